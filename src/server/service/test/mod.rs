mod auth;
mod category;
mod chapter;
mod favorite;
mod reading_progress;
mod reading_session;
mod review;
mod search;
mod token;
mod upload;
mod user;
