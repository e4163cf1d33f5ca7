use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    model::author::{AuthorDto, CreateAuthorDto, UpdateAuthorDto},
    server::util::text::{non_empty, patch_text},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub bio: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Author {
    pub fn into_dto(self) -> AuthorDto {
        AuthorDto {
            id: self.id,
            name: self.name,
            bio: self.bio,
            birth_date: self.birth_date,
            death_date: self.death_date,
            nationality: self.nationality,
            website: self.website,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn audit_snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "nationality": self.nationality,
            "website": self.website,
        })
    }

    pub fn from_entity(entity: entity::author::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            bio: entity.bio,
            birth_date: entity.birth_date,
            death_date: entity.death_date,
            nationality: entity.nationality,
            website: entity.website,
            image_url: entity.image_url,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAuthorParams {
    pub name: String,
    pub bio: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
}

impl CreateAuthorParams {
    pub fn from_dto(dto: CreateAuthorDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            bio: non_empty(dto.bio),
            birth_date: dto.birth_date,
            death_date: dto.death_date,
            nationality: non_empty(dto.nationality),
            website: non_empty(dto.website),
            image_url: non_empty(dto.image_url),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAuthorParams {
    pub name: Option<String>,
    pub bio: Option<Option<String>>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub nationality: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
}

impl UpdateAuthorParams {
    pub fn from_dto(dto: UpdateAuthorDto) -> Self {
        Self {
            name: dto.name.map(|n| n.trim().to_string()),
            bio: patch_text(dto.bio),
            birth_date: dto.birth_date,
            death_date: dto.death_date,
            nationality: patch_text(dto.nationality),
            website: patch_text(dto.website),
            image_url: patch_text(dto.image_url),
        }
    }
}
