//! Payload text encoded into the QR code.
//!
//! The payload is what a scanner app shows to a first responder, so the
//! default layout is plain readable text with no markup. A contact-card
//! layout is available as an explicit alternative.

use crate::phone::format_phone_display;
use crate::record::EmergencyRecord;
use serde::{Deserialize, Serialize};

/// Notes text used by the readable layout when none were given
pub const DEFAULT_NOTES_READABLE: &str = "None reported";
/// Notes text used by the contact-card layout when none were given
pub const DEFAULT_NOTES_CONTACT_CARD: &str = "None specified";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    /// Human-readable block, legible in any scanner
    #[default]
    Readable,
    /// vCard 3.0 with the emergency details as NOTE lines
    #[serde(alias = "vcard")]
    ContactCard,
}

/// Format a record into the payload text for `format`.
pub fn format_payload(record: &EmergencyRecord, format: PayloadFormat) -> String {
    match format {
        PayloadFormat::Readable => format_readable(record),
        PayloadFormat::ContactCard => format_contact_card(record),
    }
}

/// The plain-text emergency block.
pub fn format_readable(record: &EmergencyRecord) -> String {
    let phone = format_phone_display(record.emergency_contact_phone());
    let notes = record.medical_notes().unwrap_or(DEFAULT_NOTES_READABLE);

    let lines: [&str; 13] = [
        " EMERGENCY CONTACT ",
        "",
        &format!("PATIENT: {}", record.full_name()),
        &format!("BLOOD TYPE: {}", record.blood_type()),
        "",
        "IN CASE OF EMERGENCY, CONTACT:",
        &format!("Name: {}", record.emergency_contact_name()),
        &format!("Phone: {}", phone),
        "",
        "MEDICAL CONDITIONS:",
        notes,
        "",
        "Generated by ResQIt",
    ];
    lines.join("\n")
}

/// A vCard 3.0 contact card. Free-text values are escaped so each property
/// stays on one line.
pub fn format_contact_card(record: &EmergencyRecord) -> String {
    let phone = format_phone_display(record.emergency_contact_phone());
    let notes = vcard_escape(record.medical_notes().unwrap_or(DEFAULT_NOTES_CONTACT_CARD));

    let lines: [&str; 9] = [
        "BEGIN:VCARD",
        "VERSION:3.0",
        &format!("FN:{}", vcard_escape(record.full_name())),
        "NOTE:EMERGENCY CONTACT INFO",
        &format!("NOTE:Blood Type: {}", record.blood_type()),
        &format!(
            "NOTE:Emergency Contact: {}",
            vcard_escape(record.emergency_contact_name())
        ),
        &format!("NOTE:Emergency Phone: {}", phone),
        &format!("NOTE:Medical Info: {}", notes),
        "END:VCARD",
    ];
    lines.join("\n")
}

/// Escape a vCard 3.0 text value (RFC 2426 section 5).
fn vcard_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}
