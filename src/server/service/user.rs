use sea_orm::DatabaseConnection;

use crate::{
    model::user::{CreateUserDto, UpdateProfileDto, UpdateUserDto},
    server::{
        data::user::UserRepository,
        error::AppError,
        model::{
            log::{AdminAction, AdminActivityLogParams, ClientInfo, UserActivityLogParams},
            page::{Page, PageParams},
            user::{CreateUserParams, UpdateUserParams, User, UserFilter},
        },
        service::{log::LogService, password::hash_password},
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets users newest first, filtered by a search term and active flag.
    pub async fn get_paginated(
        &self,
        params: PageParams,
        filter: &UserFilter,
    ) -> Result<Page<User>, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_paginated(params.page, params.per_page, filter)
            .await?;

        Ok(Page::new(users, total, params))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Creates an account on behalf of an admin.
    ///
    /// # Returns
    /// - `Ok(User)` - The created account
    /// - `Err(AppError::Conflict)` - Email or username already taken
    pub async fn create(
        &self,
        admin: &User,
        dto: CreateUserDto,
        client: &ClientInfo,
    ) -> Result<User, AppError> {
        self.ensure_available(Some(&dto.email), Some(&dto.username), None)
            .await?;

        let hashed = hash_password(&dto.password)?;
        let user = UserRepository::new(self.db)
            .create(CreateUserParams::from_dto(dto, hashed))
            .await?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Create, "user", client)
                    .resource_id(user.id)
                    .after(user.audit_snapshot()),
            )
            .await;

        Ok(user)
    }

    /// Applies an admin patch to an account.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated account
    /// - `Err(AppError::NotFound)` - No such user
    /// - `Err(AppError::Conflict)` - New email or username already taken
    pub async fn update(
        &self,
        admin: &User,
        id: i32,
        dto: UpdateUserDto,
        client: &ClientInfo,
    ) -> Result<User, AppError> {
        let before = self.get_by_id(id).await?;

        self.ensure_available(dto.email.as_deref(), dto.username.as_deref(), Some(id))
            .await?;

        let hashed = match &dto.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let user = UserRepository::new(self.db)
            .update(id, UpdateUserParams::from_dto(dto, hashed))
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Update, "user", client)
                    .resource_id(id)
                    .before(before.audit_snapshot())
                    .after(user.audit_snapshot()),
            )
            .await;

        Ok(user)
    }

    /// Deletes an account. Admins cannot delete themselves.
    pub async fn delete(&self, admin: &User, id: i32, client: &ClientInfo) -> Result<(), AppError> {
        if admin.id == id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        let before = self.get_by_id(id).await?;
        UserRepository::new(self.db).delete(id).await?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Delete, "user", client)
                    .resource_id(id)
                    .before(before.audit_snapshot()),
            )
            .await;

        Ok(())
    }

    /// Updates the caller's own display fields.
    pub async fn update_profile(
        &self,
        user: &User,
        dto: UpdateProfileDto,
        client: &ClientInfo,
    ) -> Result<User, AppError> {
        let updated = UserRepository::new(self.db)
            .update(user.id, UpdateUserParams::from_profile_dto(dto))
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        LogService::new(self.db)
            .record_user_activity(
                UserActivityLogParams::new(user.id, "PROFILE_UPDATE", client)
                    .resource("user", user.id),
            )
            .await;

        Ok(updated)
    }

    /// Rejects an email or username that belongs to a different account.
    async fn ensure_available(
        &self,
        email: Option<&str>,
        username: Option<&str>,
        except: Option<i32>,
    ) -> Result<(), AppError> {
        let repo = UserRepository::new(self.db);

        if let Some(email) = email {
            if let Some(existing) = repo.find_by_email(email).await? {
                if Some(existing.id) != except {
                    return Err(AppError::Conflict("Email already registered".to_string()));
                }
            }
        }
        if let Some(username) = username {
            if let Some(existing) = repo.find_by_username(username.trim()).await? {
                if Some(existing.id) != except {
                    return Err(AppError::Conflict("Username already taken".to_string()));
                }
            }
        }

        Ok(())
    }
}
