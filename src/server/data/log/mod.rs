//! Repositories for the six append-only log tables.
//!
//! Each repository exposes a single-insert `create` and a newest-first paginated listing
//! used by the admin log endpoints. Rows are never updated or deleted here.

pub mod admin_activity;
pub mod api_request;
pub mod authentication;
pub mod performance;
pub mod search;
pub mod user_activity;
