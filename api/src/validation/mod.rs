//! Input validation for wallet callbacks
//!
//! # Overview
//!
//! 1. **Extractors** - `CallbackJson<T>`, which turns unreadable bodies into
//!    the callback server-error envelope
//! 2. **Validators** - small predicates over single field values
//! 3. **Rules** - the two rule sets (data validation, profile verification)
//! 4. **Errors** - `ValidationErrors`, the ordered field → message map
//!
//! # Failure body
//!
//! ```json
//! {
//!   "errors": {
//!     "email": "Please provide a valid email address",
//!     "physicalAddress": { "countryCode": "We don't ship to this location" }
//!   }
//! }
//! ```
//!
//! The wallet provider reads failures from the body only, every callback
//! response is HTTP 200.

pub mod errors;
pub mod extractors;
pub mod rules;
pub mod validators;

pub use errors::{FieldFailure, FieldMessages, ValidationErrors};
pub use extractors::CallbackJson;
pub use rules::{DataValidationRules, ProfileVerificationRules, RuleSet};
