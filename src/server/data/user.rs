//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing account records in the
//! database. It handles account creation, credential lookups, admin listings and patches
//! with conversion between entity models and domain models at the infrastructure boundary.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::user::{CreateUserParams, UpdateUserParams, User, UserFilter};
use crate::server::data::text_match::contains_any;

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new account.
    ///
    /// # Arguments
    /// - `params` - Account fields with the password already hashed
    ///
    /// # Returns
    /// - `Ok(User)` - The created account
    /// - `Err(DbErr)` - Database error, including unique violations on email or username
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let now = Utc::now();

        let entity = entity::user::ActiveModel {
            email: ActiveValue::Set(params.email),
            username: ActiveValue::Set(params.username),
            full_name: ActiveValue::Set(params.full_name),
            hashed_password: ActiveValue::Set(params.hashed_password),
            is_active: ActiveValue::Set(params.is_active),
            is_admin: ActiveValue::Set(params.is_admin),
            avatar_url: ActiveValue::Set(None),
            bio: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds an account by primary key.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Account found
    /// - `Ok(None)` - No account with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds an account by email address, compared case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email.trim().to_lowercase()))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds an account by exact username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username.trim()))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Gets accounts with pagination, newest first.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of accounts per page
    /// - `filter` - Optional text search and active flag
    ///
    /// # Returns
    /// - `Ok((users, total))` - Accounts for the requested page and the total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        page: u64,
        per_page: u64,
        filter: &UserFilter,
    ) -> Result<(Vec<User>, u64), DbErr> {
        let mut query = entity::prelude::User::find();

        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let search = search.trim();
            query = query.filter(contains_any(
                self.db.get_database_backend(),
                &[
                    entity::user::Column::Email,
                    entity::user::Column::Username,
                    entity::user::Column::FullName,
                ],
                search,
            ));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(entity::user::Column::IsActive.eq(is_active));
        }

        let paginator = query
            .order_by_desc(entity::user::Column::CreatedAt)
            .order_by_desc(entity::user::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((entities.into_iter().map(User::from_entity).collect(), total))
    }

    /// Applies a column patch to an account.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated account
    /// - `Ok(None)` - No account with that id
    /// - `Err(DbErr)` - Database error, including unique violations
    pub async fn update(&self, id: i32, params: UpdateUserParams) -> Result<Option<User>, DbErr> {
        let Some(model) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = model.into();
        if let Some(email) = params.email {
            active.email = ActiveValue::Set(email);
        }
        if let Some(username) = params.username {
            active.username = ActiveValue::Set(username);
        }
        if let Some(hash) = params.hashed_password {
            active.hashed_password = ActiveValue::Set(hash);
        }
        if let Some(full_name) = params.full_name {
            active.full_name = ActiveValue::Set(full_name);
        }
        if let Some(avatar_url) = params.avatar_url {
            active.avatar_url = ActiveValue::Set(avatar_url);
        }
        if let Some(bio) = params.bio {
            active.bio = ActiveValue::Set(bio);
        }
        if let Some(is_active) = params.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        if let Some(is_admin) = params.is_admin {
            active.is_admin = ActiveValue::Set(is_admin);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(User::from_entity(entity)))
    }

    /// Deletes an account.
    ///
    /// # Returns
    /// - `Ok(true)` - Account deleted
    /// - `Ok(false)` - No account with that id
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts all accounts.
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }
}
