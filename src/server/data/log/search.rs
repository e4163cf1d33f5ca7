use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::log::SearchLogParams;

pub struct SearchLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SearchLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: SearchLogParams) -> Result<entity::search_log::Model, DbErr> {
        entity::search_log::ActiveModel {
            query: ActiveValue::Set(params.query),
            search_type: ActiveValue::Set(params.search_type),
            results_count: ActiveValue::Set(params.results_count),
            user_id: ActiveValue::Set(params.user_id),
            filters: ActiveValue::Set(params.filters),
            duration_ms: ActiveValue::Set(params.duration_ms),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get_paginated(
        &self,
        page: u64,
        per_page: u64,
        user_id: Option<i32>,
    ) -> Result<(Vec<entity::search_log::Model>, u64), DbErr> {
        let mut query = entity::prelude::SearchLog::find();
        if let Some(user_id) = user_id {
            query = query.filter(entity::search_log::Column::UserId.eq(user_id));
        }

        let paginator = query
            .order_by_desc(entity::search_log::Column::CreatedAt)
            .order_by_desc(entity::search_log::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entries = paginator.fetch_page(page).await?;

        Ok((entries, total))
    }
}
