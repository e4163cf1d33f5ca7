use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryOrder,
};

use crate::server::model::log::PerformanceLogParams;

pub struct PerformanceLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PerformanceLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: PerformanceLogParams,
    ) -> Result<entity::performance_log::Model, DbErr> {
        entity::performance_log::ActiveModel {
            component: ActiveValue::Set(params.component),
            operation: ActiveValue::Set(params.operation),
            duration_ms: ActiveValue::Set(params.duration_ms),
            endpoint: ActiveValue::Set(params.endpoint),
            user_id: ActiveValue::Set(params.user_id),
            admin_id: ActiveValue::Set(params.admin_id),
            details: ActiveValue::Set(params.details),
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
    ) -> Result<(Vec<entity::performance_log::Model>, u64), DbErr> {
        let paginator = entity::prelude::PerformanceLog::find()
            .order_by_desc(entity::performance_log::Column::CreatedAt)
            .order_by_desc(entity::performance_log::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entries = paginator.fetch_page(page).await?;

        Ok((entries, total))
    }
}
