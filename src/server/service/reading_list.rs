//! Owner-scoped reading lists.
//!
//! Lists are readable by their owner and, when public, by anyone signed in. Every
//! mutation requires ownership.

use std::collections::HashSet;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{book::BookRepository, reading_list::ReadingListRepository},
    error::{auth::AuthError, AppError},
    model::{
        log::{ClientInfo, UserActivityLogParams},
        reading_list::{
            CreateReadingListParams, ReadingList, ReadingListItem, UpdateReadingListParams,
        },
        user::User,
    },
    service::log::LogService,
};

pub struct ReadingListService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReadingListService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user: &User,
        params: CreateReadingListParams,
        client: &ClientInfo,
    ) -> Result<ReadingList, AppError> {
        let list = ReadingListRepository::new(self.db).create(params).await?;

        self.record(user, "READING_LIST_CREATE", list.id, client).await;

        Ok(list)
    }

    pub async fn get_mine(&self, user: &User) -> Result<Vec<ReadingList>, AppError> {
        Ok(ReadingListRepository::new(self.db)
            .get_by_user(user.id)
            .await?)
    }

    /// Gets a list visible to the caller.
    ///
    /// # Returns
    /// - `Ok(ReadingList)` - The caller owns the list or it is public
    /// - `Err(AppError::NotFound)` - No such list, or a private list owned by someone else
    pub async fn get(&self, user: &User, id: i32) -> Result<ReadingList, AppError> {
        let list = self.find(id).await?;

        if list.user_id != user.id && !list.is_public {
            return Err(AppError::NotFound("Reading list not found".to_string()));
        }

        Ok(list)
    }

    pub async fn update(
        &self,
        user: &User,
        id: i32,
        params: UpdateReadingListParams,
        client: &ClientInfo,
    ) -> Result<ReadingList, AppError> {
        self.owned(user, id).await?;

        let list = ReadingListRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Reading list not found".to_string()))?;

        self.record(user, "READING_LIST_UPDATE", id, client).await;

        Ok(list)
    }

    pub async fn delete(&self, user: &User, id: i32, client: &ClientInfo) -> Result<(), AppError> {
        self.owned(user, id).await?;

        ReadingListRepository::new(self.db).delete(id).await?;

        self.record(user, "READING_LIST_DELETE", id, client).await;

        Ok(())
    }

    /// Appends a book to the end of one of the caller's lists.
    ///
    /// # Returns
    /// - `Ok(ReadingListItem)` - The new item
    /// - `Err(AppError::NotFound)` - List or book does not exist
    /// - `Err(AppError::Conflict)` - Book already in the list
    pub async fn add_book(
        &self,
        user: &User,
        list_id: i32,
        book_id: i32,
        notes: Option<String>,
        client: &ClientInfo,
    ) -> Result<ReadingListItem, AppError> {
        let repo = ReadingListRepository::new(self.db);
        self.owned(user, list_id).await?;

        if !BookRepository::new(self.db).exists(book_id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        if repo.contains_book(list_id, book_id).await? {
            return Err(AppError::Conflict(
                "Book is already in this reading list".to_string(),
            ));
        }

        let item = repo.add_item(list_id, book_id, notes).await?;

        LogService::new(self.db)
            .record_user_activity(
                UserActivityLogParams::new(user.id, "READING_LIST_ADD_BOOK", client)
                    .resource("reading_list", list_id)
                    .metadata(serde_json::json!({ "book_id": book_id })),
            )
            .await;

        Ok(item)
    }

    pub async fn remove_book(
        &self,
        user: &User,
        list_id: i32,
        book_id: i32,
        client: &ClientInfo,
    ) -> Result<(), AppError> {
        self.owned(user, list_id).await?;

        if !ReadingListRepository::new(self.db)
            .remove_item(list_id, book_id)
            .await?
        {
            return Err(AppError::NotFound(
                "Book is not in this reading list".to_string(),
            ));
        }

        LogService::new(self.db)
            .record_user_activity(
                UserActivityLogParams::new(user.id, "READING_LIST_REMOVE_BOOK", client)
                    .resource("reading_list", list_id)
                    .metadata(serde_json::json!({ "book_id": book_id })),
            )
            .await;

        Ok(())
    }

    /// Reorders a list so `book_ids[i]` sits at position `i`.
    ///
    /// Books left out of `book_ids` keep their relative order after the listed ones.
    ///
    /// # Returns
    /// - `Ok(ReadingList)` - The list in its new order
    /// - `Err(AppError::BadRequest)` - A listed id is not in the list or appears twice
    pub async fn reorder(
        &self,
        user: &User,
        list_id: i32,
        book_ids: Vec<i32>,
        client: &ClientInfo,
    ) -> Result<ReadingList, AppError> {
        let list = self.owned(user, list_id).await?;

        let present: HashSet<i32> = list.items.iter().map(|i| i.book_id).collect();
        let mut seen = HashSet::new();
        for book_id in &book_ids {
            if !present.contains(book_id) {
                return Err(AppError::BadRequest(format!(
                    "Book {} is not in this reading list",
                    book_id
                )));
            }
            if !seen.insert(*book_id) {
                return Err(AppError::BadRequest(format!(
                    "Book {} is listed more than once",
                    book_id
                )));
            }
        }

        let repo = ReadingListRepository::new(self.db);
        repo.reorder(list_id, &book_ids).await?;

        self.record(user, "READING_LIST_REORDER", list_id, client).await;

        self.find(list_id).await
    }

    async fn find(&self, id: i32) -> Result<ReadingList, AppError> {
        ReadingListRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reading list not found".to_string()))
    }

    /// Loads a list and checks that `user` owns it.
    async fn owned(&self, user: &User, id: i32) -> Result<ReadingList, AppError> {
        let list = self.find(id).await?;

        if list.user_id != user.id {
            return Err(
                AuthError::AccessDenied(user.id, format!("modify reading list {}", id)).into(),
            );
        }

        Ok(list)
    }

    async fn record(&self, user: &User, activity: &str, list_id: i32, client: &ClientInfo) {
        LogService::new(self.db)
            .record_user_activity(
                UserActivityLogParams::new(user.id, activity, client)
                    .resource("reading_list", list_id),
            )
            .await;
    }
}
