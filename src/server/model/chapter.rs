use chrono::{DateTime, Utc};

use crate::{
    model::chapter::{ChapterDto, CreateChapterDto, UpdateChapterDto},
    server::util::text::{non_empty, patch_text},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub id: i32,
    pub book_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub chapter_number: i32,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chapter {
    pub fn into_dto(self) -> ChapterDto {
        ChapterDto {
            id: self.id,
            book_id: self.book_id,
            title: self.title,
            content: self.content,
            chapter_number: self.chapter_number,
            image_url: self.image_url,
            is_published: self.is_published,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn audit_snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "book_id": self.book_id,
            "title": self.title,
            "chapter_number": self.chapter_number,
            "is_published": self.is_published,
            "is_active": self.is_active,
        })
    }

    pub fn from_entity(entity: entity::chapter::Model) -> Self {
        Self {
            id: entity.id,
            book_id: entity.book_id,
            title: entity.title,
            content: entity.content,
            chapter_number: entity.chapter_number,
            image_url: entity.image_url,
            is_published: entity.is_published,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateChapterParams {
    pub book_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub chapter_number: i32,
    pub image_url: Option<String>,
    pub is_published: bool,
}

impl CreateChapterParams {
    pub fn from_dto(book_id: i32, dto: CreateChapterDto) -> Self {
        Self {
            book_id,
            title: dto.title.trim().to_string(),
            content: non_empty(dto.content),
            chapter_number: dto.chapter_number,
            image_url: non_empty(dto.image_url),
            is_published: dto.is_published.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateChapterParams {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub chapter_number: Option<i32>,
    pub image_url: Option<Option<String>>,
    pub is_published: Option<bool>,
    pub is_active: Option<bool>,
}

impl UpdateChapterParams {
    pub fn from_dto(dto: UpdateChapterDto) -> Self {
        Self {
            title: dto.title.map(|t| t.trim().to_string()),
            content: patch_text(dto.content),
            chapter_number: dto.chapter_number,
            image_url: patch_text(dto.image_url),
            is_published: dto.is_published,
            is_active: dto.is_active,
        }
    }
}
