//! Emergency record domain types and form validation

use crate::phone::{digits_only, MAX_DIGITS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message shown for any combination of missing required fields.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// Raw text fields captured from the emergency form.
///
/// Field names follow the form's input names so a submission can be loaded
/// straight from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFields {
    pub full_name: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub blood_type: String,
    #[serde(alias = "Allergies")]
    pub allergies: Option<String>,
}

impl RawFields {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| Error::Validation(format!("Malformed form submission: {}", e)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    Unknown,
}

impl BloodType {
    pub const ALL: [BloodType; 9] = [
        BloodType::OPositive,
        BloodType::ONegative,
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        BloodType::ALL
            .into_iter()
            .find(|bt| bt.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::Validation(format!("Unrecognised blood type '{}'", wanted)))
    }
}

/// A validated emergency record. Built fresh per submission and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyRecord {
    full_name: String,
    emergency_contact_name: String,
    /// Digits only
    emergency_contact_phone: String,
    blood_type: BloodType,
    medical_notes: Option<String>,
}

impl EmergencyRecord {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn emergency_contact_name(&self) -> &str {
        &self.emergency_contact_name
    }

    /// Canonical digits-only phone number
    pub fn emergency_contact_phone(&self) -> &str {
        &self.emergency_contact_phone
    }

    pub fn blood_type(&self) -> BloodType {
        self.blood_type
    }

    pub fn medical_notes(&self) -> Option<&str> {
        self.medical_notes.as_deref()
    }
}

/// Validate raw form fields into an [`EmergencyRecord`].
///
/// Any missing required field yields the same aggregate error; callers never
/// learn which field was empty.
pub fn validate(raw: &RawFields) -> Result<EmergencyRecord> {
    let full_name = raw.full_name.trim();
    let contact_name = raw.emergency_contact_name.trim();
    let contact_phone = raw.emergency_contact_phone.trim();
    let blood_type = raw.blood_type.trim();

    if [full_name, contact_name, contact_phone, blood_type]
        .iter()
        .any(|f| f.is_empty())
    {
        log::debug!("validation failed: missing required fields");
        return Err(Error::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    }

    // A phone field made entirely of punctuation is as good as empty.
    let phone_digits = digits_only(contact_phone);
    if phone_digits.is_empty() {
        log::debug!("validation failed: phone has no digits");
        return Err(Error::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    }
    // The display mask keeps only the first ten digits, so a longer number
    // would be encoded as a different one.
    if phone_digits.len() > MAX_DIGITS {
        log::debug!("validation failed: phone has {} digits", phone_digits.len());
        return Err(Error::Validation(format!(
            "Emergency contact phone must have at most {} digits.",
            MAX_DIGITS
        )));
    }

    let blood_type: BloodType = blood_type.parse()?;

    let medical_notes = raw
        .allergies
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    Ok(EmergencyRecord {
        full_name: full_name.to_string(),
        emergency_contact_name: contact_name.to_string(),
        emergency_contact_phone: phone_digits,
        blood_type,
        medical_notes,
    })
}
