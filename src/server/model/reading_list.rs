use chrono::{DateTime, Utc};

use crate::{
    model::reading_list::{
        CreateReadingListDto, ReadingListDto, ReadingListItemDto, UpdateReadingListDto,
    },
    server::util::text::{non_empty, patch_text},
};

/// Reading list with its items in `order_index` order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingList {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<ReadingListItem>,
}

impl ReadingList {
    pub fn into_dto(self) -> ReadingListDto {
        ReadingListDto {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            is_public: self.is_public,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items: self.items.into_iter().map(ReadingListItem::into_dto).collect(),
        }
    }

    pub fn from_entity(entity: entity::reading_list::Model, items: Vec<ReadingListItem>) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            name: entity.name,
            description: entity.description,
            is_public: entity.is_public,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadingListItem {
    pub id: i32,
    pub book_id: i32,
    pub book_title: Option<String>,
    pub order_index: i32,
    pub notes: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl ReadingListItem {
    pub fn into_dto(self) -> ReadingListItemDto {
        ReadingListItemDto {
            id: self.id,
            book_id: self.book_id,
            book_title: self.book_title,
            order_index: self.order_index,
            notes: self.notes,
            added_at: self.added_at,
        }
    }

    pub fn from_entity(entity: entity::reading_list_item::Model, book_title: Option<String>) -> Self {
        Self {
            id: entity.id,
            book_id: entity.book_id,
            book_title,
            order_index: entity.order_index,
            notes: entity.notes,
            added_at: entity.added_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateReadingListParams {
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
}

impl CreateReadingListParams {
    pub fn from_dto(user_id: i32, dto: CreateReadingListDto) -> Self {
        Self {
            user_id,
            name: dto.name.trim().to_string(),
            description: non_empty(dto.description),
            is_public: dto.is_public.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReadingListParams {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_public: Option<bool>,
}

impl UpdateReadingListParams {
    pub fn from_dto(dto: UpdateReadingListDto) -> Self {
        Self {
            name: dto.name.map(|n| n.trim().to_string()),
            description: patch_text(dto.description),
            is_public: dto.is_public,
        }
    }
}
