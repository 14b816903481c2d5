//! Password policy evaluator - main evaluation logic.

use secrecy::SecretString;

#[cfg(feature = "async")]
use std::time::Duration;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::policy::{PolicyVerdict, RuleResult};
use crate::rules::{SectionResult, character_variety_section, length_section};

/// Delay before an async evaluation runs, so a burst of keystrokes only
/// produces the last verdict.
#[cfg(feature = "async")]
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Evaluates a password candidate against every policy rule.
///
/// Pure and total: never fails, holds no state, and always returns the
/// same verdict for the same input.
pub fn evaluate_password_policy(password: &SecretString) -> PolicyVerdict {
    // Orchestrator: execute sections in sequence
    let sections: [(&str, fn(&SecretString) -> SectionResult); 2] = [
        ("length", length_section),
        ("variety", character_variety_section),
    ];

    let mut decided: Vec<RuleResult> = Vec::with_capacity(5);
    for (_section_name, section_fn) in sections {
        let results = section_fn(password);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            section = _section_name,
            failed = results.iter().filter(|r| !r.satisfied).count(),
            "policy section evaluated"
        );

        decided.extend(results);
    }

    PolicyVerdict::from_fn(|rule| decided.iter().any(|r| r.rule == rule && r.satisfied))
}

/// Async version that debounces, then sends the verdict via channel.
///
/// Nothing is sent if `token` is cancelled before the debounce elapses,
/// which is how a newer keystroke supersedes this one.
#[cfg(feature = "async")]
pub async fn evaluate_password_policy_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<PolicyVerdict>,
) {
    tokio::select! {
        _ = token.cancelled() => {
            #[cfg(feature = "tracing")]
            tracing::debug!("policy evaluation superseded");
            return;
        }
        _ = tokio::time::sleep(DEBOUNCE) => {}
    }

    let verdict = evaluate_password_policy(password);

    if let Err(_e) = tx.send(verdict).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send policy verdict: {}", _e);
    }
}
