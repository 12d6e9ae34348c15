//! Trigonometry core — pure, synchronous, no I/O.
//!
//! - `angle`: first-match angle extraction from free text
//! - `calc`: the six functions with near-asymptote guards
//! - `identities`: the static identity catalog

pub mod angle;
pub mod calc;
pub mod identities;

pub use angle::{parse_angle, ParsedAngle};
pub use calc::{evaluate, TrigFunction, UNDEFINED_EPSILON};
pub use identities::{IdentityCatalog, IdentityGroup};
