use crate::server::{
    data::log::{authentication::AuthenticationLogRepository, performance::PerformanceLogRepository},
    model::log::{AuthEvent, AuthenticationLogParams, ClientInfo, PerformanceLogParams},
};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod authentication;
mod performance;
