//! QR encoding capability.
//!
//! The pipeline only needs "text in, module grid out". The real encoder is
//! backed by the `qrcode` crate behind the `qr` feature; builds without it get
//! an encoder that reports itself unavailable so the caller can surface that
//! distinctly from an ordinary encoding failure.

use crate::matrix::RasterMatrix;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Error correction level requested from the encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    /// ~30% recovery, tolerant of camera glare and print wear
    #[default]
    High,
}

/// Core trait for QR encoder implementations
pub trait QrEncoder: Send + Sync {
    /// Encode `text` into a square module grid. The version (and so the side
    /// length) is picked by the encoder.
    fn encode(&self, text: &str, ecc: ErrorCorrection) -> Result<RasterMatrix>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

#[cfg(feature = "qr")]
pub struct QrCodeEncoder;

#[cfg(feature = "qr")]
impl QrCodeEncoder {
    pub fn new() -> Self {
        QrCodeEncoder
    }
}

#[cfg(feature = "qr")]
impl Default for QrCodeEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "qr")]
impl QrEncoder for QrCodeEncoder {
    fn encode(&self, text: &str, ecc: ErrorCorrection) -> Result<RasterMatrix> {
        use qrcode::{Color, EcLevel, QrCode};

        let level = match ecc {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        };

        let code = QrCode::with_error_correction_level(text.as_bytes(), level)
            .map_err(|e| Error::EncodingFailure(e.to_string()))?;

        let side = code.width();
        let cells = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        log::debug!("encoded {} bytes into {}x{} modules", text.len(), side, side);
        RasterMatrix::from_cells(side, cells)
    }

    fn name(&self) -> &'static str {
        "qrcode"
    }
}

/// Stand-in used when no encoding backend was compiled in
pub struct UnavailableEncoder;

impl UnavailableEncoder {
    pub fn new() -> Self {
        UnavailableEncoder
    }
}

impl Default for UnavailableEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QrEncoder for UnavailableEncoder {
    fn encode(&self, _text: &str, _ecc: ErrorCorrection) -> Result<RasterMatrix> {
        Err(Error::EncoderUnavailable(
            "no QR backend compiled in (enable the `qr` feature)".into(),
        ))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

/// Create the default encoder for this build.
#[cfg(feature = "qr")]
pub fn new_encoder() -> Box<dyn QrEncoder> {
    Box::new(QrCodeEncoder::new())
}

// Without a backend every encode reports `EncoderUnavailable`.
#[cfg(not(feature = "qr"))]
pub fn new_encoder() -> Box<dyn QrEncoder> {
    Box::new(UnavailableEncoder::new())
}
