//! Password policy rules
//!
//! Each section decides one family of rules.

mod length;
mod variety;

pub use length::length_section;
pub use variety::character_variety_section;

use crate::policy::RuleResult;

/// Result type for section functions: the outcome of every rule the
/// section is responsible for.
pub type SectionResult = Vec<RuleResult>;
