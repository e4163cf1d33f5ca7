use sea_orm::DatabaseConnection;

use crate::server::{
    data::category::CategoryRepository,
    error::AppError,
    model::{
        category::{Category, CreateCategoryParams, UpdateCategoryParams},
        log::{AdminAction, AdminActivityLogParams, ClientInfo},
        page::{Page, PageParams},
        user::User,
    },
    service::log::LogService,
};

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets categories alphabetically. Inactive categories are only included for admins.
    pub async fn get_paginated(
        &self,
        params: PageParams,
        include_inactive: bool,
    ) -> Result<Page<Category>, AppError> {
        let (categories, total) = CategoryRepository::new(self.db)
            .get_paginated(params.page, params.per_page, !include_inactive)
            .await?;

        Ok(Page::new(categories, total, params))
    }

    pub async fn get_by_id(&self, id: i32, include_inactive: bool) -> Result<Category, AppError> {
        CategoryRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|c| include_inactive || c.is_active)
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    pub async fn get_by_slug(
        &self,
        slug: &str,
        include_inactive: bool,
    ) -> Result<Category, AppError> {
        CategoryRepository::new(self.db)
            .find_by_slug(slug)
            .await?
            .filter(|c| include_inactive || c.is_active)
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    /// Creates a category; the slug is derived from the name and must be unique.
    pub async fn create(
        &self,
        admin: &User,
        params: CreateCategoryParams,
        client: &ClientInfo,
    ) -> Result<Category, AppError> {
        let repo = CategoryRepository::new(self.db);

        if repo.find_by_slug(&params.slug).await?.is_some() {
            return Err(AppError::Conflict(
                "A category with this name already exists".to_string(),
            ));
        }

        let category = repo.create(params).await?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Create, "category", client)
                    .resource_id(category.id)
                    .after(category.audit_snapshot()),
            )
            .await;

        Ok(category)
    }

    pub async fn update(
        &self,
        admin: &User,
        id: i32,
        params: UpdateCategoryParams,
        client: &ClientInfo,
    ) -> Result<Category, AppError> {
        let repo = CategoryRepository::new(self.db);
        let before = self.get_by_id(id, true).await?;

        if let Some((_, slug)) = &params.name {
            if let Some(existing) = repo.find_by_slug(slug).await? {
                if existing.id != id {
                    return Err(AppError::Conflict(
                        "A category with this name already exists".to_string(),
                    ));
                }
            }
        }

        let category = repo
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Update, "category", client)
                    .resource_id(id)
                    .before(before.audit_snapshot())
                    .after(category.audit_snapshot()),
            )
            .await;

        Ok(category)
    }

    pub async fn delete(&self, admin: &User, id: i32, client: &ClientInfo) -> Result<(), AppError> {
        let before = self.get_by_id(id, true).await?;

        CategoryRepository::new(self.db).delete(id).await?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Delete, "category", client)
                    .resource_id(id)
                    .before(before.audit_snapshot()),
            )
            .await;

        Ok(())
    }
}
