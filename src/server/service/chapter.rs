use sea_orm::DatabaseConnection;

use crate::server::{
    data::{book::BookRepository, chapter::ChapterRepository},
    error::AppError,
    model::{
        chapter::{Chapter, CreateChapterParams, UpdateChapterParams},
        log::{AdminAction, AdminActivityLogParams, ClientInfo},
        user::User,
    },
    service::log::LogService,
};

pub struct ChapterService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChapterService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a book's chapters in order.
    ///
    /// # Arguments
    /// - `book_id` - Book whose chapters to list
    /// - `include_unpublished` - Admin view; also returns drafts and deactivated chapters
    ///
    /// # Returns
    /// - `Ok(Vec<Chapter>)` - Chapters ordered by chapter number
    /// - `Err(AppError::NotFound)` - Book does not exist
    pub async fn get_by_book(
        &self,
        book_id: i32,
        include_unpublished: bool,
    ) -> Result<Vec<Chapter>, AppError> {
        if !BookRepository::new(self.db).exists(book_id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        let chapters = ChapterRepository::new(self.db)
            .get_by_book(book_id, !include_unpublished)
            .await?;

        Ok(chapters)
    }

    pub async fn get_by_id(&self, id: i32, include_unpublished: bool) -> Result<Chapter, AppError> {
        ChapterRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|c| include_unpublished || (c.is_published && c.is_active))
            .ok_or_else(|| AppError::NotFound("Chapter not found".to_string()))
    }

    /// Adds a chapter to a book.
    ///
    /// # Returns
    /// - `Ok(Chapter)` - Created chapter
    /// - `Err(AppError::NotFound)` - Book does not exist
    /// - `Err(AppError::Conflict)` - The book already has a chapter with this number
    pub async fn create(
        &self,
        admin: &User,
        params: CreateChapterParams,
        client: &ClientInfo,
    ) -> Result<Chapter, AppError> {
        if !BookRepository::new(self.db).exists(params.book_id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        self.check_number(params.book_id, params.chapter_number, None)
            .await?;

        let chapter = ChapterRepository::new(self.db).create(params).await?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Create, "chapter", client)
                    .resource_id(chapter.id)
                    .after(chapter.audit_snapshot()),
            )
            .await;

        Ok(chapter)
    }

    pub async fn update(
        &self,
        admin: &User,
        id: i32,
        params: UpdateChapterParams,
        client: &ClientInfo,
    ) -> Result<Chapter, AppError> {
        let before = self.get_by_id(id, true).await?;

        if let Some(number) = params.chapter_number {
            self.check_number(before.book_id, number, Some(id)).await?;
        }

        let chapter = ChapterRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Chapter not found".to_string()))?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Update, "chapter", client)
                    .resource_id(id)
                    .before(before.audit_snapshot())
                    .after(chapter.audit_snapshot()),
            )
            .await;

        Ok(chapter)
    }

    pub async fn delete(&self, admin: &User, id: i32, client: &ClientInfo) -> Result<(), AppError> {
        let before = self.get_by_id(id, true).await?;

        ChapterRepository::new(self.db).delete(id).await?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Delete, "chapter", client)
                    .resource_id(id)
                    .before(before.audit_snapshot()),
            )
            .await;

        Ok(())
    }

    async fn check_number(
        &self,
        book_id: i32,
        number: i32,
        except: Option<i32>,
    ) -> Result<(), AppError> {
        let taken = ChapterRepository::new(self.db)
            .get_by_book(book_id, false)
            .await?
            .into_iter()
            .any(|c| c.chapter_number == number && Some(c.id) != except);

        if taken {
            return Err(AppError::Conflict(format!(
                "Chapter {} already exists for this book",
                number
            )));
        }

        Ok(())
    }
}
