//! Password policy evaluation and account plumbing
//!
//! This library evaluates password candidates against a fixed policy and
//! provides the pieces an account UI needs around it: an account API
//! client, an explicit session, and form state driven by
//! request/response messages.
//!
//! # Features
//!
//! - `async` (default): Enables debounced evaluation and the controller worker loop
//! - `http` (default): Enables the reqwest-based account API client
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `ACCOUNT_API_BASE_URL`: Account service root (default: `http://localhost:8000`)
//! - `ACCOUNT_API_TIMEOUT_SECS`: Request timeout (default: `30`)
//! - `ACCOUNT_AUTH_SCHEME`: Authorization scheme (default: `Token`)
//! - `ACCOUNT_SESSION_PATH`: File the session token is persisted to
//!
//! # Example
//!
//! ```rust
//! use pwd_account::{RuleId, evaluate_password_policy};
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("Abcdefg1!".to_string().into());
//! let verdict = evaluate_password_policy(&password);
//!
//! for indicator in verdict.results() {
//!     println!("{}", indicator);
//! }
//! assert!(verdict.get(RuleId::HasSymbol));
//! assert!(verdict.all_satisfied());
//! ```

// Internal modules
mod config;
mod controller;
mod evaluator;
mod policy;
mod rules;
mod session;

pub mod api;
pub mod forms;
pub mod messages;

// Public API
pub use config::{ClientConfig, ConfigError};
pub use controller::AccountController;
pub use evaluator::evaluate_password_policy;
pub use messages::{Command, CommandKind, Outcome};
pub use policy::{MIN_LENGTH, PolicyVerdict, RuleId, RuleResult};
pub use session::{Session, SessionError};

#[cfg(feature = "async")]
pub use evaluator::{DEBOUNCE, evaluate_password_policy_tx};
