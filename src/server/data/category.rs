//! Category data repository.
//!
//! Provides `CategoryRepository` for category CRUD, slug lookups and name search.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::category::{Category, CreateCategoryParams, UpdateCategoryParams};
use crate::server::data::text_match::contains_any;

pub struct CategoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new category.
    ///
    /// # Returns
    /// - `Ok(Category)` - The created category
    /// - `Err(DbErr)` - Database error, including unique violations on name or slug
    pub async fn create(&self, params: CreateCategoryParams) -> Result<Category, DbErr> {
        let now = Utc::now();

        let entity = entity::category::ActiveModel {
            name: ActiveValue::Set(params.name),
            slug: ActiveValue::Set(params.slug),
            description: ActiveValue::Set(params.description),
            is_active: ActiveValue::Set(params.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Category::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Category>, DbErr> {
        let entity = entity::prelude::Category::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Category::from_entity))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, DbErr> {
        let entity = entity::prelude::Category::find()
            .filter(entity::category::Column::Slug.eq(slug))
            .one(self.db)
            .await?;

        Ok(entity.map(Category::from_entity))
    }

    /// Gets categories alphabetically with pagination.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of categories per page
    /// - `active_only` - Exclude deactivated categories
    ///
    /// # Returns
    /// - `Ok((categories, total))` - Categories for the requested page and the total count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        page: u64,
        per_page: u64,
        active_only: bool,
    ) -> Result<(Vec<Category>, u64), DbErr> {
        let mut query = entity::prelude::Category::find();
        if active_only {
            query = query.filter(entity::category::Column::IsActive.eq(true));
        }

        let paginator = query
            .order_by_asc(entity::category::Column::Name)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((entities.into_iter().map(Category::from_entity).collect(), total))
    }

    /// Finds active categories whose name or description contains `text`.
    pub async fn search(&self, text: &str, limit: u64) -> Result<Vec<Category>, DbErr> {
        let entities = entity::prelude::Category::find()
            .filter(entity::category::Column::IsActive.eq(true))
            .filter(contains_any(
                self.db.get_database_backend(),
                &[
                    entity::category::Column::Name,
                    entity::category::Column::Description,
                ],
                text,
            ))
            .order_by_asc(entity::category::Column::Name)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Category::from_entity).collect())
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateCategoryParams,
    ) -> Result<Option<Category>, DbErr> {
        let Some(model) = entity::prelude::Category::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::category::ActiveModel = model.into();
        if let Some((name, slug)) = params.name {
            active.name = ActiveValue::Set(name);
            active.slug = ActiveValue::Set(slug);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(is_active) = params.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Category::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Category::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Category::find()
            .filter(entity::category::Column::Id.eq(id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
