//! Category domain models and parameters.
//!
//! Categories group books for browsing. Each carries a unique slug derived from its
//! name; renaming a category regenerates the slug.

use chrono::{DateTime, Utc};

use crate::{
    model::category::{CategoryDto, CreateCategoryDto, UpdateCategoryDto},
    server::util::text::{non_empty, patch_text, slugify},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn into_dto(self) -> CategoryDto {
        CategoryDto {
            id: self.id,
            name: self.name,
            description: self.description,
            slug: self.slug,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn audit_snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "slug": self.slug,
            "is_active": self.is_active,
        })
    }

    pub fn from_entity(entity: entity::category::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            slug: entity.slug,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCategoryParams {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
}

impl CreateCategoryParams {
    pub fn from_dto(dto: CreateCategoryDto) -> Self {
        let name = dto.name.trim().to_string();

        Self {
            slug: slugify(&name),
            name,
            description: non_empty(dto.description),
            is_active: dto.is_active.unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryParams {
    /// New name together with its regenerated slug
    pub name: Option<(String, String)>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl UpdateCategoryParams {
    pub fn from_dto(dto: UpdateCategoryDto) -> Self {
        Self {
            name: dto.name.map(|n| {
                let name = n.trim().to_string();
                let slug = slugify(&name);
                (name, slug)
            }),
            description: patch_text(dto.description),
            is_active: dto.is_active,
        }
    }
}
