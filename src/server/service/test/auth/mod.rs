use crate::{
    model::auth::{LoginDto, RegisterDto, ResetPasswordDto},
    server::{
        config::{Config, Environment},
        error::{auth::AuthError, AppError},
        model::{log::ClientInfo, user::User},
        service::{
            auth::AuthService,
            email::EmailService,
            password::{hash_password, verify_password},
            token::{TokenService, TokenType},
        },
    },
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod login;
mod password_reset;
mod refresh;
mod register;

fn config() -> Config {
    Config::for_environment(Environment::Development, "sqlite::memory:", "test-secret-key")
}

fn client() -> ClientInfo {
    ClientInfo {
        ip_address: Some("127.0.0.1".to_string()),
        user_agent: Some("tests".to_string()),
        path: Some("/api/v1/auth/login".to_string()),
    }
}
