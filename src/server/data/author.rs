use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::author::{Author, CreateAuthorParams, UpdateAuthorParams};
use crate::server::data::text_match::contains_any;

pub struct AuthorRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthorRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateAuthorParams) -> Result<Author, DbErr> {
        let now = Utc::now();

        let entity = entity::author::ActiveModel {
            name: ActiveValue::Set(params.name),
            bio: ActiveValue::Set(params.bio),
            birth_date: ActiveValue::Set(params.birth_date),
            death_date: ActiveValue::Set(params.death_date),
            nationality: ActiveValue::Set(params.nationality),
            website: ActiveValue::Set(params.website),
            image_url: ActiveValue::Set(params.image_url),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Author::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DbErr> {
        let entity = entity::prelude::Author::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Author::from_entity))
    }

    /// Gets authors alphabetically with pagination.
    ///
    /// # Returns
    /// - `Ok((authors, total))` - Authors for the requested page and the total count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(&self, page: u64, per_page: u64) -> Result<(Vec<Author>, u64), DbErr> {
        let paginator = entity::prelude::Author::find()
            .order_by_asc(entity::author::Column::Name)
            .order_by_asc(entity::author::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((entities.into_iter().map(Author::from_entity).collect(), total))
    }

    /// Finds authors whose name contains `text`, up to `limit` rows.
    pub async fn search(&self, text: &str, limit: u64) -> Result<Vec<Author>, DbErr> {
        let entities = entity::prelude::Author::find()
            .filter(contains_any(
                self.db.get_database_backend(),
                &[entity::author::Column::Name],
                text,
            ))
            .order_by_asc(entity::author::Column::Name)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Author::from_entity).collect())
    }

    pub async fn update(&self, id: i32, params: UpdateAuthorParams) -> Result<Option<Author>, DbErr> {
        let Some(model) = entity::prelude::Author::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::author::ActiveModel = model.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(bio) = params.bio {
            active.bio = ActiveValue::Set(bio);
        }
        if let Some(birth_date) = params.birth_date {
            active.birth_date = ActiveValue::Set(Some(birth_date));
        }
        if let Some(death_date) = params.death_date {
            active.death_date = ActiveValue::Set(Some(death_date));
        }
        if let Some(nationality) = params.nationality {
            active.nationality = ActiveValue::Set(nationality);
        }
        if let Some(website) = params.website {
            active.website = ActiveValue::Set(website);
        }
        if let Some(image_url) = params.image_url {
            active.image_url = ActiveValue::Set(image_url);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Author::from_entity(entity)))
    }

    /// Deletes an author; their books cascade.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Author::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Author::find()
            .filter(entity::author::Column::Id.eq(id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
