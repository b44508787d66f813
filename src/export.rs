//! Download and print exports of a rendered code.
//!
//! Both work on an already-rendered [`Raster`]; nothing here re-encodes.

use crate::record::EmergencyRecord;
use crate::rendering::Raster;
use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File name used for the downloaded image
pub const DOWNLOAD_FILE_NAME: &str = "emergency-qr-code.png";

/// Write the raster's PNG to `dir/file_name`. Returns the written path.
pub fn write_png(raster: &Raster, dir: &Path, file_name: &str) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(Error::ExportError(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    let path = dir.join(file_name);
    fs::write(&path, &raster.png_data)
        .map_err(|e| Error::ExportError(format!("writing {}: {}", path.display(), e)))?;
    log::debug!("wrote {} bytes to {}", raster.png_data.len(), path.display());
    Ok(path)
}

/// `data:` URL of the raster's PNG, for embedding in the print card.
pub fn png_data_url(raster: &Raster) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(&raster.png_data))
}

/// A printable wallet card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintCard {
    pub title: String,
    pub html: String,
}

pub fn render_print_card(record: &EmergencyRecord, raster: &Raster) -> PrintCard {
    let name = html_escape(record.full_name());
    let blood_type = html_escape(record.blood_type().as_str());
    let title = format!("Emergency QR Code - {}", record.full_name());
    let html = CARD_TEMPLATE
        .replace("{{title}}", &html_escape(&title))
        .replace("{{qr}}", &png_data_url(raster))
        .replace("{{name}}", &name)
        .replace("{{blood_type}}", &blood_type);
    PrintCard { title, html }
}

/// Escape text for interpolation into HTML element content or attributes.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Destination for print cards (a print dialog, a file, a test buffer)
pub trait PrintSink: Send + Sync {
    fn print(&self, card: &PrintCard) -> Result<()>;
}

/// Writes the card to an HTML file that can be opened and printed.
pub struct HtmlFilePrintSink {
    path: PathBuf,
}

impl HtmlFilePrintSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintSink for HtmlFilePrintSink {
    fn print(&self, card: &PrintCard) -> Result<()> {
        fs::write(&self.path, &card.html)
            .map_err(|e| Error::ExportError(format!("writing {}: {}", self.path.display(), e)))?;
        log::info!("print card written to {}", self.path.display());
        Ok(())
    }
}

/// Keeps printed cards in memory
#[derive(Default)]
pub struct MemoryPrintSink {
    cards: Mutex<Vec<PrintCard>>,
}

impl MemoryPrintSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> Vec<PrintCard> {
        self.cards.lock().unwrap().clone()
    }
}

impl PrintSink for MemoryPrintSink {
    fn print(&self, card: &PrintCard) -> Result<()> {
        self.cards.lock().unwrap().push(card.clone());
        Ok(())
    }
}

const CARD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<style>
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; padding: 20px; display: flex; justify-content: center; align-items: center; min-height: 100vh; background: #f5f5f5; }
.card { width: 3.5in; height: 2.3in; background: linear-gradient(135deg, #ffffff 0%, #f8f9fa 100%); border: 3px solid #e74c3c; border-radius: 12px; padding: 15px; display: flex; align-items: center; gap: 15px; position: relative; overflow: hidden; }
.qr-section { display: flex; flex-direction: column; align-items: center; flex-shrink: 0; }
.qr-code { width: 1.4in; height: 1.4in; border: 2px solid #ecf0f1; border-radius: 8px; padding: 3px; background: white; }
.scan-text { font-size: 8px; color: #7f8c8d; margin-top: 4px; text-align: center; font-weight: 500; }
.info { flex: 1; display: flex; flex-direction: column; justify-content: space-between; height: 100%; padding: 5px 0; }
.header { border-bottom: 2px solid #e74c3c; padding-bottom: 6px; margin-bottom: 8px; }
.title { font-weight: 800; font-size: 14px; color: #e74c3c; letter-spacing: 0.5px; text-transform: uppercase; }
.subtitle { font-size: 9px; color: #7f8c8d; margin-top: 2px; font-weight: 500; }
.patient-info { flex: 1; display: flex; flex-direction: column; justify-content: center; }
.name { font-weight: 700; font-size: 13px; color: #2c3e50; margin-bottom: 4px; }
.blood-type { background: #e74c3c; color: white; padding: 2px 8px; border-radius: 12px; font-size: 10px; font-weight: 600; display: inline-block; width: fit-content; margin-bottom: 6px; }
.instructions { font-size: 9px; color: #7f8c8d; line-height: 1.3; font-style: italic; }
.footer { border-top: 1px solid #ecf0f1; padding: 6px 0 8px; margin-top: 8px; }
.emergency-badge { background: #27ae60; color: white; padding: 1px 6px; border-radius: 8px; font-size: 8px; font-weight: 600; display: inline-block; margin-bottom: 2px; }
.features { font-size: 8px; color: #95a5a6; line-height: 1.2; margin-bottom: 10px; }
@media print {
  body { padding: 10px; background: white !important; }
  .card { border-color: #333; }
}
</style>
</head>
<body>
<div class="card">
  <div class="qr-section">
    <img src="{{qr}}" alt="Emergency QR Code" class="qr-code">
    <div class="scan-text">SCAN ME</div>
  </div>
  <div class="info">
    <div class="header">
      <div class="title">Emergency QR</div>
      <div class="subtitle">Medical Information Card</div>
    </div>
    <div class="patient-info">
      <div class="name">{{name}}</div>
      <div class="blood-type">{{blood_type}}</div>
      <div class="instructions">Scan QR code for complete emergency contact information and medical details</div>
    </div>
    <div class="footer">
      <div class="emergency-badge">VERIFIED</div>
      <div class="features">Contains: Emergency contacts, medical conditions, blood type information</div>
    </div>
  </div>
</div>
</body>
</html>
"#;
