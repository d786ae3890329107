//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - HS256 bearer tokens signed with the configured secret
//! - `mock` - Fixed token table for tests

mod jwt;
mod mock;

pub use jwt::{JwtSessionValidator, SessionClaims, Subject};
pub use mock::MockSessionValidator;
