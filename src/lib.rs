//! ResQIt emergency QR generator
//!
//! Turns a small emergency-contact form into a QR code that any phone camera
//! can read as plain text, renders it to a fixed-size PNG and produces a
//! printable wallet card.
//!
//! # Pipeline
//!
//! - **Validate**: raw form fields become an [`EmergencyRecord`]
//! - **Format**: the record becomes a readable text payload
//! - **Encode**: a [`QrEncoder`] turns the payload into a module grid
//! - **Rasterize**: the grid is painted onto a square canvas, scaled to fit
//!
//! # Example
//!
//! ```no_run
//! use resqit::{GeneratorConfig, RawFields};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = resqit::new_app(GeneratorConfig::default())?;
//! let fields = RawFields {
//!     full_name: "John Doe".into(),
//!     emergency_contact_name: "Jane Doe".into(),
//!     emergency_contact_phone: "5551234567".into(),
//!     blood_type: "O+".into(),
//!     allergies: Some("Penicillin allergy".into()),
//! };
//! app.submit(&fields)?;
//! app.download(std::path::Path::new("."))?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub mod error;
pub use error::{Error, Result};

pub mod app;
pub mod encoder;
pub mod export;
pub mod matrix;
pub mod notify;
pub mod payload;
pub mod phone;
pub mod record;
pub mod rendering;
pub mod scheduler;
pub mod screen;

pub use app::EmergencyQrApp;
pub use encoder::{new_encoder, ErrorCorrection, QrEncoder};
pub use matrix::RasterMatrix;
pub use payload::{format_payload, PayloadFormat};
pub use phone::format_phone_display;
pub use record::{validate, BloodType, EmergencyRecord, RawFields};
pub use rendering::{rasterize, Raster};
pub use screen::Screen;

/// Configuration for the generator
///
/// Defaults reproduce the web form: a 300px black-on-white code with high
/// error correction, exported as `emergency-qr-code.png`.
///
/// # Examples
///
/// ```
/// let cfg = resqit::GeneratorConfig::default();
/// assert_eq!(cfg.canvas_side, 300);
/// ```
///
/// The encoder is always asked for [`ErrorCorrection::High`]; there is no key
/// for it, and unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Side of the square canvas in pixels
    pub canvas_side: u32,
    /// Which payload layout to encode
    pub payload_format: PayloadFormat,
    /// Module colour, `#RRGGBB`
    pub dark_color: String,
    /// Background colour, `#RRGGBB`
    pub light_color: String,
    /// File name for the downloaded image
    pub download_file_name: String,
    /// Delay before the print card is handed to the printer
    pub print_delay_ms: u64,
    /// Delay before a new notification slides in
    pub notification_enter_ms: u64,
    /// How long a notification stays fully visible
    pub notification_display_ms: u64,
    /// Length of the leave animation before the notification is removed
    pub notification_exit_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            canvas_side: 300,
            payload_format: PayloadFormat::Readable,
            dark_color: "#000000".to_string(),
            light_color: "#FFFFFF".to_string(),
            download_file_name: export::DOWNLOAD_FILE_NAME.to_string(),
            print_delay_ms: 500,
            notification_enter_ms: 10,
            notification_display_ms: 4000,
            notification_exit_ms: 300,
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file; absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("reading {}: {}", path.display(), e))
        })?;
        let cfg: Self = serde_json::from_str(&contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas_side == 0 {
            return Err(Error::ConfigError("canvas_side must be non-zero".into()));
        }
        if self.download_file_name.trim().is_empty() {
            return Err(Error::ConfigError("download_file_name is empty".into()));
        }
        rendering::Palette::from_hex(&self.dark_color, &self.light_color)?;
        Ok(())
    }

    pub fn print_delay(&self) -> Duration {
        Duration::from_millis(self.print_delay_ms)
    }

    pub fn notification_timing(&self) -> notify::NotificationTiming {
        notify::NotificationTiming {
            enter: Duration::from_millis(self.notification_enter_ms),
            display: Duration::from_millis(self.notification_display_ms),
            exit: Duration::from_millis(self.notification_exit_ms),
        }
    }
}

/// Create an app with the default encoder, bound to the current tokio runtime.
pub fn new_app(config: GeneratorConfig) -> Result<EmergencyQrApp> {
    EmergencyQrApp::new(config, new_encoder(), scheduler::Scheduler::current()?)
}
