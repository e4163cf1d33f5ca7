//! User domain models and parameters.
//!
//! Provides the domain model for platform accounts along with parameter types for
//! registration, admin management and self-service profile edits.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        auth::RegisterDto,
        user::{CreateUserDto, UpdateProfileDto, UpdateUserDto, UserDto},
    },
    server::util::text::{non_empty, patch_text},
};

/// Role asserted in access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Platform account.
///
/// Carries the password hash so the login flow can verify credentials; the hash never
/// leaves the server because `into_dto` drops it.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    /// Argon2 PHC string.
    pub hashed_password: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        if self.is_admin {
            Role::Admin
        } else {
            Role::User
        }
    }

    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            username: self.username,
            full_name: self.full_name,
            is_active: self.is_active,
            is_admin: self.is_admin,
            avatar_url: self.avatar_url,
            bio: self.bio,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// JSON snapshot used for admin activity before/after state.
    pub fn audit_snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "email": self.email,
            "username": self.username,
            "full_name": self.full_name,
            "is_active": self.is_active,
            "is_admin": self.is_admin,
        })
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            username: entity.username,
            full_name: entity.full_name,
            hashed_password: entity.hashed_password,
            is_active: entity.is_active,
            is_admin: entity.is_admin,
            avatar_url: entity.avatar_url,
            bio: entity.bio,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Parameters for inserting a new account.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub email: String,
    pub username: String,
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
}

impl CreateUserParams {
    /// Builds parameters for an admin-created account.
    ///
    /// # Arguments
    /// - `dto` - Validated request body
    /// - `hashed_password` - Argon2 hash of `dto.password`
    pub fn from_dto(dto: CreateUserDto, hashed_password: String) -> Self {
        Self {
            email: dto.email.trim().to_lowercase(),
            username: dto.username.trim().to_string(),
            hashed_password,
            full_name: non_empty(dto.full_name),
            is_active: dto.is_active.unwrap_or(true),
            is_admin: dto.is_admin.unwrap_or(false),
        }
    }
}

impl CreateUserParams {
    /// Builds parameters for a self-registered account, which is active and never admin.
    pub fn register(dto: RegisterDto, hashed_password: String) -> Self {
        Self {
            email: dto.email.trim().to_lowercase(),
            username: dto.username.trim().to_string(),
            hashed_password,
            full_name: non_empty(dto.full_name),
            is_active: true,
            is_admin: false,
        }
    }
}

/// Column patch for an account. `None` leaves a column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParams {
    pub email: Option<String>,
    pub username: Option<String>,
    pub hashed_password: Option<String>,
    pub full_name: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
}

impl UpdateUserParams {
    /// Builds an admin patch.
    ///
    /// # Arguments
    /// - `dto` - Validated request body
    /// - `hashed_password` - Hash of `dto.password` when a new password was supplied
    pub fn from_dto(dto: UpdateUserDto, hashed_password: Option<String>) -> Self {
        Self {
            email: dto.email.map(|e| e.trim().to_lowercase()),
            username: dto.username.map(|u| u.trim().to_string()),
            hashed_password,
            full_name: patch_text(dto.full_name),
            is_active: dto.is_active,
            is_admin: dto.is_admin,
            ..Default::default()
        }
    }

    /// Builds a self-service profile patch, which never touches credentials or flags.
    pub fn from_profile_dto(dto: UpdateProfileDto) -> Self {
        Self {
            full_name: patch_text(dto.full_name),
            bio: patch_text(dto.bio),
            avatar_url: patch_text(dto.avatar_url),
            ..Default::default()
        }
    }

    /// Patch that only replaces the password hash.
    pub fn password(hashed_password: String) -> Self {
        Self {
            hashed_password: Some(hashed_password),
            ..Default::default()
        }
    }
}

/// Filters for the admin user listing.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Substring matched against email, username and full name
    pub search: Option<String>,
    pub is_active: Option<bool>,
}
