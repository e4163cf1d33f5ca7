mod auth_guard;
mod request_log;
mod validate;
