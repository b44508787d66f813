#![cfg(feature = "qr")]

use resqit::encoder::QrCodeEncoder;
use resqit::export::MemoryPrintSink;
use resqit::scheduler::Scheduler;
use resqit::{
    EmergencyQrApp, ErrorCorrection, GeneratorConfig, QrEncoder, RasterMatrix, RawFields, Screen,
};
use std::sync::{Arc, Mutex};

/// Wraps the real encoder and keeps the matrix it produced
struct Spy {
    inner: QrCodeEncoder,
    seen: Arc<Mutex<Vec<(String, ErrorCorrection, RasterMatrix)>>>,
}

impl QrEncoder for Spy {
    fn encode(&self, text: &str, ecc: ErrorCorrection) -> resqit::Result<RasterMatrix> {
        let m = self.inner.encode(text, ecc)?;
        self.seen
            .lock()
            .unwrap()
            .push((text.to_string(), ecc, m.clone()));
        Ok(m)
    }

    fn name(&self) -> &'static str {
        "spy"
    }
}

fn john() -> RawFields {
    RawFields {
        full_name: "John Doe".into(),
        emergency_contact_name: "Jane Doe".into(),
        emergency_contact_phone: "5551234567".into(),
        blood_type: "O+".into(),
        allergies: Some("Penicillin allergy".into()),
    }
}

#[tokio::test(start_paused = true)]
async fn form_to_rendered_code() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let spy = Spy {
        inner: QrCodeEncoder::new(),
        seen: seen.clone(),
    };
    let mut app = EmergencyQrApp::new(
        GeneratorConfig::default(),
        Box::new(spy),
        Scheduler::current().unwrap(),
    )
    .expect("app");

    let code = app.submit(&john()).expect("submit");
    for needle in ["John Doe", "O+", "Jane Doe", "(555) 123-4567", "Penicillin allergy"] {
        assert!(code.payload.contains(needle), "payload missing {needle:?}");
    }
    assert_eq!(app.screen(), Screen::CodeVisible);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (text, ecc, matrix) = &seen[0];
    assert_eq!(*ecc, ErrorCorrection::High);
    assert_eq!(Some(text.as_str()), app.last_payload());

    // Every pixel belongs to exactly one module and carries that module's
    // colour: no gaps between neighbouring dark modules.
    let raster = app.raster().unwrap();
    let n = matrix.side();
    let cell = 300.0 / n as f64;
    let edges: Vec<u32> = (0..=n)
        .map(|i| ((i as f64 * cell) + 1e-6).floor() as u32)
        .collect();
    assert_eq!(edges[0], 0);
    assert_eq!(edges[n], 300);
    for row in 0..n {
        for col in 0..n {
            let want = if matrix.is_dark(row, col) {
                (0, 0, 0, 255)
            } else {
                (255, 255, 255, 255)
            };
            for y in edges[row]..edges[row + 1] {
                for x in edges[col]..edges[col + 1] {
                    assert_eq!(
                        raster.pixel(x, y),
                        Some(want),
                        "module ({row},{col}) pixel ({x},{y})"
                    );
                }
            }
        }
    }

    app.edit();
    assert_eq!(app.screen(), Screen::FormVisible);
}

#[tokio::test(start_paused = true)]
async fn download_and_print_use_rendered_code() {
    let mut app = resqit::new_app(GeneratorConfig::default()).expect("app");
    app.submit(&john()).expect("submit");

    let dir = std::env::temp_dir().join(format!("resqit-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = app.download(&dir).expect("download");
    assert!(path.ends_with("emergency-qr-code.png"));
    assert_eq!(std::fs::read(&path).unwrap(), app.raster().unwrap().png_data);
    std::fs::remove_dir_all(&dir).ok();

    let sink = Arc::new(MemoryPrintSink::new());
    let task = app.print(sink.clone()).expect("print");
    assert!(task.join().await);
    let cards = sink.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "Emergency QR Code - John Doe");
}
