//! Length section - checks password minimum length.

use secrecy::{ExposeSecret, SecretString};

use super::SectionResult;
use crate::policy::{MIN_LENGTH, RuleId, RuleResult};

/// Checks if the password meets the minimum length.
///
/// Length is counted in UTF-16 code units, the way a browser text field
/// reports it, so a character outside the BMP such as an emoji counts as
/// two. There is no maximum.
pub fn length_section(password: &SecretString) -> SectionResult {
    let len = password.expose_secret().encode_utf16().count();
    vec![RuleResult {
        rule: RuleId::MinLength,
        satisfied: len >= MIN_LENGTH,
    }]
}
