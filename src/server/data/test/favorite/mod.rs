use crate::server::data::favorite::FavoriteRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod get_by_user_paginated;
