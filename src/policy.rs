//! Policy data model: rule identifiers, per-rule results and the verdict.

use std::fmt;

/// Minimum number of characters a password must contain.
pub const MIN_LENGTH: usize = 8;

/// Identifies one rule of the password policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    MinLength,
    HasUpper,
    HasLower,
    HasDigit,
    HasSymbol,
}

impl RuleId {
    /// All rules, in the order indicators are rendered.
    pub const ALL: [RuleId; 5] = [
        RuleId::MinLength,
        RuleId::HasUpper,
        RuleId::HasLower,
        RuleId::HasDigit,
        RuleId::HasSymbol,
    ];

    /// Human readable label shown next to the indicator.
    pub fn label(self) -> &'static str {
        match self {
            RuleId::MinLength => "Minimum 8 characters",
            RuleId::HasUpper => "One uppercase letter",
            RuleId::HasLower => "One lowercase letter",
            RuleId::HasDigit => "One number",
            RuleId::HasSymbol => "One special character",
        }
    }
}

/// Outcome of a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleResult {
    pub rule: RuleId,
    pub satisfied: bool,
}

impl fmt::Display for RuleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.satisfied { '✔' } else { '✖' };
        write!(f, "{} {}", mark, self.rule.label())
    }
}

/// The complete set of rule outcomes for one password candidate.
///
/// Results are always stored in [`RuleId::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyVerdict {
    results: [RuleResult; 5],
}

impl PolicyVerdict {
    /// Builds a verdict from a predicate deciding each rule.
    pub(crate) fn from_fn(mut satisfied: impl FnMut(RuleId) -> bool) -> Self {
        Self {
            results: RuleId::ALL.map(|rule| RuleResult {
                rule,
                satisfied: satisfied(rule),
            }),
        }
    }

    /// Verdict where every rule fails; what an empty form shows.
    pub fn unsatisfied() -> Self {
        Self::from_fn(|_| false)
    }

    pub fn results(&self) -> &[RuleResult] {
        &self.results
    }

    /// Returns whether `rule` is satisfied.
    pub fn get(&self, rule: RuleId) -> bool {
        self.results
            .iter()
            .find(|r| r.rule == rule)
            .map(|r| r.satisfied)
            .unwrap_or(false)
    }

    /// True iff every rule is satisfied.
    pub fn all_satisfied(&self) -> bool {
        self.results.iter().all(|r| r.satisfied)
    }

    /// Labels of the rules that are not satisfied, in order.
    pub fn unmet(&self) -> Vec<&'static str> {
        self.results
            .iter()
            .filter(|r| !r.satisfied)
            .map(|r| r.rule.label())
            .collect()
    }
}

impl Default for PolicyVerdict {
    fn default() -> Self {
        Self::unsatisfied()
    }
}
