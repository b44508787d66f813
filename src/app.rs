//! The emergency QR application: form in, rendered code and exports out.
//!
//! One `EmergencyQrApp` is built when the host is ready and lives until it
//! exits. It owns the screen state, the last rendered code and the
//! notification center; nothing is persisted.

use crate::encoder::{ErrorCorrection, QrEncoder};
use crate::export::{self, PrintSink};
use crate::notify::NotificationCenter;
use crate::payload::format_payload;
use crate::phone::format_phone_display;
use crate::record::{validate, EmergencyRecord, RawFields};
use crate::rendering::{rasterize_with_palette, Palette, Raster};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::screen::Screen;
use crate::{Error, GeneratorConfig, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const MSG_ENCODER_UNAVAILABLE: &str =
    "QR Code library failed to load. Please refresh the page and try again.";
pub const MSG_ENCODING_FAILED: &str = "Failed to generate QR code. Please try again.";
pub const MSG_DOWNLOADED: &str = "QR code downloaded successfully!";
pub const MSG_PRINT_OPENED: &str = "Print dialog opened!";

const PRINT_KEY: &str = "print";

/// Output of the last successful submission
#[derive(Debug, Clone)]
pub struct RenderedCode {
    pub record: EmergencyRecord,
    pub payload: String,
    pub raster: Raster,
}

pub struct EmergencyQrApp {
    config: GeneratorConfig,
    palette: Palette,
    encoder: Box<dyn QrEncoder>,
    scheduler: Scheduler,
    notifications: NotificationCenter,
    screen: Screen,
    rendered: Option<RenderedCode>,
}

impl EmergencyQrApp {
    pub fn new(
        config: GeneratorConfig,
        encoder: Box<dyn QrEncoder>,
        scheduler: Scheduler,
    ) -> Result<Self> {
        config.validate()?;
        let palette = Palette::from_hex(&config.dark_color, &config.light_color)?;
        let notifications = NotificationCenter::new(scheduler.clone(), config.notification_timing());
        log::debug!("app ready with encoder '{}'", encoder.name());
        Ok(Self {
            config,
            palette,
            encoder,
            scheduler,
            notifications,
            screen: Screen::default(),
            rendered: None,
        })
    }

    /// Run validate -> format -> encode -> rasterize and switch to the code.
    ///
    /// On error a notification is shown and the screen and previous code are
    /// left as they were.
    pub fn submit(&mut self, raw: &RawFields) -> Result<&RenderedCode> {
        match self.render(raw) {
            Ok(code) => {
                self.screen = self.screen.on_encoded();
                Ok(&*self.rendered.insert(code))
            }
            Err(e) => {
                self.notifications.error(&user_message(&e));
                Err(e)
            }
        }
    }

    fn render(&self, raw: &RawFields) -> Result<RenderedCode> {
        let record = validate(raw)?;
        let payload = format_payload(&record, self.config.payload_format);
        log::debug!("payload formatted ({} bytes)", payload.len());

        let matrix = self.encoder.encode(&payload, ErrorCorrection::High)?;
        let raster = rasterize_with_palette(&matrix, self.config.canvas_side, &self.palette)?;
        log::info!(
            "QR code generated: {} modules, {}px",
            matrix.side(),
            self.config.canvas_side
        );
        Ok(RenderedCode {
            record,
            payload,
            raster,
        })
    }

    /// Keystroke handler for the phone field.
    pub fn phone_input(&self, text: &str) -> String {
        format_phone_display(text)
    }

    pub fn edit(&mut self) {
        self.screen = self.screen.on_edit();
    }

    /// Export the current code as `emergency-qr-code.png` in `dir`.
    pub fn download(&self, dir: &Path) -> Result<PathBuf> {
        let code = self.rendered_or_err()?;
        let path = export::write_png(&code.raster, dir, &self.config.download_file_name)
            .inspect_err(|e| {
                self.notifications.error(&e.to_string());
            })?;
        self.notifications.success(MSG_DOWNLOADED);
        Ok(path)
    }

    /// Build the print card and hand it to `sink` after the print delay.
    ///
    /// A print requested while another is still pending replaces it.
    pub fn print(&self, sink: Arc<dyn PrintSink>) -> Result<TaskHandle> {
        let code = self.rendered_or_err()?;
        let card = export::render_print_card(&code.record, &code.raster);
        let task = self
            .scheduler
            .schedule_keyed(PRINT_KEY, self.config.print_delay(), move || {
                if let Err(e) = sink.print(&card) {
                    log::error!("print failed: {}", e);
                }
            });
        self.notifications.success(MSG_PRINT_OPENED);
        Ok(task)
    }

    fn rendered_or_err(&self) -> Result<&RenderedCode> {
        self.rendered
            .as_ref()
            .ok_or_else(|| Error::ExportError("no QR code has been generated yet".into()))
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn rendered(&self) -> Option<&RenderedCode> {
        self.rendered.as_ref()
    }

    pub fn raster(&self) -> Option<&Raster> {
        self.rendered.as_ref().map(|c| &c.raster)
    }

    pub fn last_payload(&self) -> Option<&str> {
        self.rendered.as_ref().map(|c| c.payload.as_str())
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

/// Text shown to the user for a pipeline error
pub fn user_message(err: &Error) -> String {
    match err {
        Error::Validation(msg) => msg.clone(),
        Error::EncoderUnavailable(_) => MSG_ENCODER_UNAVAILABLE.to_string(),
        Error::EncodingFailure(_) | Error::RenderError(_) => MSG_ENCODING_FAILED.to_string(),
        other => other.to_string(),
    }
}
