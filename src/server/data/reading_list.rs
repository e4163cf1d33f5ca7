//! Reading list data repository.
//!
//! Provides `ReadingListRepository` for list CRUD and item management. Items carry an
//! `order_index`; new items go to the end and reordering rewrites the indexes of every
//! listed item inside one transaction.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::model::reading_list::{
    CreateReadingListParams, ReadingList, ReadingListItem, UpdateReadingListParams,
};

pub struct ReadingListRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReadingListRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateReadingListParams) -> Result<ReadingList, DbErr> {
        let now = Utc::now();

        let entity = entity::reading_list::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            is_public: ActiveValue::Set(params.is_public),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(ReadingList::from_entity(entity, Vec::new()))
    }

    /// Gets a list with its items in order.
    ///
    /// # Returns
    /// - `Ok(Some(ReadingList))` - List found
    /// - `Ok(None)` - No list with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<ReadingList>, DbErr> {
        let Some(entity) = entity::prelude::ReadingList::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let items = self.get_items(id).await?;

        Ok(Some(ReadingList::from_entity(entity, items)))
    }

    /// Gets every active list owned by a user, newest first, with items.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<ReadingList>, DbErr> {
        let entities = entity::prelude::ReadingList::find()
            .filter(entity::reading_list::Column::UserId.eq(user_id))
            .filter(entity::reading_list::Column::IsActive.eq(true))
            .order_by_desc(entity::reading_list::Column::CreatedAt)
            .order_by_desc(entity::reading_list::Column::Id)
            .all(self.db)
            .await?;

        let mut lists = Vec::with_capacity(entities.len());
        for entity in entities {
            let items = self.get_items(entity.id).await?;
            lists.push(ReadingList::from_entity(entity, items));
        }

        Ok(lists)
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateReadingListParams,
    ) -> Result<Option<ReadingList>, DbErr> {
        let Some(model) = entity::prelude::ReadingList::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::reading_list::ActiveModel = model.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(is_public) = params.is_public {
            active.is_public = ActiveValue::Set(is_public);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;
        let items = self.get_items(id).await?;

        Ok(Some(ReadingList::from_entity(entity, items)))
    }

    /// Deletes a list; its items cascade.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ReadingList::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Appends a book to the end of a list.
    ///
    /// # Returns
    /// - `Ok(ReadingListItem)` - The new item with `order_index` one past the current maximum
    /// - `Err(DbErr)` - Database error, including a unique violation when the book is
    ///   already in the list
    pub async fn add_item(
        &self,
        list_id: i32,
        book_id: i32,
        notes: Option<String>,
    ) -> Result<ReadingListItem, DbErr> {
        let last = entity::prelude::ReadingListItem::find()
            .filter(entity::reading_list_item::Column::ReadingListId.eq(list_id))
            .order_by_desc(entity::reading_list_item::Column::OrderIndex)
            .one(self.db)
            .await?;
        let order_index = last.map(|item| item.order_index + 1).unwrap_or(0);

        let entity = entity::reading_list_item::ActiveModel {
            reading_list_id: ActiveValue::Set(list_id),
            book_id: ActiveValue::Set(book_id),
            order_index: ActiveValue::Set(order_index),
            notes: ActiveValue::Set(notes),
            added_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let title = entity::prelude::Book::find_by_id(book_id)
            .one(self.db)
            .await?
            .map(|b| b.title);

        Ok(ReadingListItem::from_entity(entity, title))
    }

    pub async fn contains_book(&self, list_id: i32, book_id: i32) -> Result<bool, DbErr> {
        let item = entity::prelude::ReadingListItem::find()
            .filter(entity::reading_list_item::Column::ReadingListId.eq(list_id))
            .filter(entity::reading_list_item::Column::BookId.eq(book_id))
            .one(self.db)
            .await?;

        Ok(item.is_some())
    }

    pub async fn remove_item(&self, list_id: i32, book_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ReadingListItem::delete_many()
            .filter(entity::reading_list_item::Column::ReadingListId.eq(list_id))
            .filter(entity::reading_list_item::Column::BookId.eq(book_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Rewrites item positions so `book_ids[i]` gets `order_index = i`.
    ///
    /// Items missing from `book_ids` follow the listed ones in their current order, so every
    /// item ends with a distinct index in `0..len`. Ids that are not in the list are skipped.
    pub async fn reorder(&self, list_id: i32, book_ids: &[i32]) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        let mut items: HashMap<i32, entity::reading_list_item::Model> =
            entity::prelude::ReadingListItem::find()
                .filter(entity::reading_list_item::Column::ReadingListId.eq(list_id))
                .all(&txn)
                .await?
                .into_iter()
                .map(|item| (item.book_id, item))
                .collect();

        let mut ordered: Vec<entity::reading_list_item::Model> = book_ids
            .iter()
            .filter_map(|book_id| items.remove(book_id))
            .collect();
        let mut rest: Vec<entity::reading_list_item::Model> = items.into_values().collect();
        rest.sort_by_key(|item| (item.order_index, item.id));
        ordered.extend(rest);

        for (index, item) in ordered.into_iter().enumerate() {
            let index = index as i32;
            if item.order_index == index {
                continue;
            }
            let mut active: entity::reading_list_item::ActiveModel = item.into();
            active.order_index = ActiveValue::Set(index);
            active.update(&txn).await?;
        }

        entity::prelude::ReadingList::update_many()
            .filter(entity::reading_list::Column::Id.eq(list_id))
            .col_expr(
                entity::reading_list::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(&txn)
            .await?;

        txn.commit().await
    }

    async fn get_items(&self, list_id: i32) -> Result<Vec<ReadingListItem>, DbErr> {
        let entities = entity::prelude::ReadingListItem::find()
            .filter(entity::reading_list_item::Column::ReadingListId.eq(list_id))
            .order_by_asc(entity::reading_list_item::Column::OrderIndex)
            .all(self.db)
            .await?;

        let book_ids: Vec<i32> = entities.iter().map(|i| i.book_id).collect();
        let titles: HashMap<i32, String> = if book_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::Book::find()
                .filter(entity::book::Column::Id.is_in(book_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|b| (b.id, b.title))
                .collect()
        };

        Ok(entities
            .into_iter()
            .map(|entity| {
                let title = titles.get(&entity.book_id).cloned();
                ReadingListItem::from_entity(entity, title)
            })
            .collect())
    }
}
