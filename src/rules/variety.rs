//! Character variety section - checks for uppercase, lowercase, digits, symbols.

use secrecy::{ExposeSecret, SecretString};

use super::SectionResult;
use crate::policy::{RuleId, RuleResult};

/// Checks which ASCII character classes the password contains.
///
/// Only `A-Z` and `a-z` count as letters. Anything outside `[A-Za-z0-9]`,
/// including non-ASCII letters, counts as a symbol.
pub fn character_variety_section(password: &SecretString) -> SectionResult {
    let pwd = password.expose_secret();
    let has_upper = pwd.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = pwd.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = pwd.chars().any(|c| c.is_ascii_digit());
    let has_symbol = pwd.chars().any(|c| !c.is_ascii_alphanumeric());

    vec![
        RuleResult {
            rule: RuleId::HasUpper,
            satisfied: has_upper,
        },
        RuleResult {
            rule: RuleId::HasLower,
            satisfied: has_lower,
        },
        RuleResult {
            rule: RuleId::HasDigit,
            satisfied: has_digit,
        },
        RuleResult {
            rule: RuleId::HasSymbol,
            satisfied: has_symbol,
        },
    ]
}
