use sea_orm::DatabaseConnection;

use crate::server::{
    data::author::AuthorRepository,
    error::AppError,
    model::{
        author::{Author, CreateAuthorParams, UpdateAuthorParams},
        log::{AdminAction, AdminActivityLogParams, ClientInfo},
        page::{Page, PageParams},
        user::User,
    },
    service::log::LogService,
};

pub struct AuthorService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthorService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<Author>, AppError> {
        let (authors, total) = AuthorRepository::new(self.db)
            .get_paginated(params.page, params.per_page)
            .await?;

        Ok(Page::new(authors, total, params))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Author, AppError> {
        AuthorRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }

    pub async fn create(
        &self,
        admin: &User,
        params: CreateAuthorParams,
        client: &ClientInfo,
    ) -> Result<Author, AppError> {
        let author = AuthorRepository::new(self.db).create(params).await?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Create, "author", client)
                    .resource_id(author.id)
                    .after(author.audit_snapshot()),
            )
            .await;

        Ok(author)
    }

    pub async fn update(
        &self,
        admin: &User,
        id: i32,
        params: UpdateAuthorParams,
        client: &ClientInfo,
    ) -> Result<Author, AppError> {
        let repo = AuthorRepository::new(self.db);
        let before = self.get_by_id(id).await?;

        let author = repo
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Update, "author", client)
                    .resource_id(id)
                    .before(before.audit_snapshot())
                    .after(author.audit_snapshot()),
            )
            .await;

        Ok(author)
    }

    /// Deletes an author together with their books.
    pub async fn delete(&self, admin: &User, id: i32, client: &ClientInfo) -> Result<(), AppError> {
        let before = self.get_by_id(id).await?;

        AuthorRepository::new(self.db).delete(id).await?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Delete, "author", client)
                    .resource_id(id)
                    .before(before.audit_snapshot()),
            )
            .await;

        Ok(())
    }
}
