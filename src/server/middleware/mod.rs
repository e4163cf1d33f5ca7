//! Request processing layers and guard extractors.
//!
//! - `auth` - Bearer token guard and the `CurrentUser` / `AdminUser` / `OptionalUser`
//!   extractors
//! - `context` - Identity slot shared between auth and request logging, and the
//!   `ClientInfo` extractor
//! - `request_log` - Api request and slow request logging
//! - `validate` - `ValidatedJson` body extractor

pub mod auth;
pub mod context;
pub mod request_log;
pub mod validate;

#[cfg(test)]
mod test;
