//! Phone number presentation for the emergency contact field.
//!
//! Formatting is progressive so it can be applied on every keystroke:
//! partial input is masked as far as the digits allow.

/// Maximum number of digits kept from the input (area code + exchange + subscriber)
pub const MAX_DIGITS: usize = 10;

/// Strip every non-digit character.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format partially typed phone input as `(AAA) EEE-SSSS`.
///
/// - 0..=2 digits: digits as-is
/// - 3..=5 digits: `(DDD) D..`
/// - 6..=10 digits: `(DDD) DDD-D..`
///
/// Anything past ten digits is dropped.
pub fn format_phone_display(partial: &str) -> String {
    let mut digits = digits_only(partial);
    digits.truncate(MAX_DIGITS);

    // All chars are ASCII digits so byte slicing is safe.
    match digits.len() {
        0..=2 => digits,
        3..=5 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}
