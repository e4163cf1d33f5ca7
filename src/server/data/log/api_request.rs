use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryOrder,
};

use crate::server::model::log::ApiRequestLogParams;

pub struct ApiRequestLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApiRequestLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: ApiRequestLogParams,
    ) -> Result<entity::api_request_log::Model, DbErr> {
        entity::api_request_log::ActiveModel {
            endpoint: ActiveValue::Set(params.endpoint),
            method: ActiveValue::Set(params.method),
            status_code: ActiveValue::Set(params.status_code),
            duration_ms: ActiveValue::Set(params.duration_ms),
            user_id: ActiveValue::Set(params.user_id),
            admin_id: ActiveValue::Set(params.admin_id),
            client_ip: ActiveValue::Set(params.client_ip),
            user_agent: ActiveValue::Set(params.user_agent),
            correlation_id: ActiveValue::Set(params.correlation_id),
            query_params: ActiveValue::Set(params.query_params),
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
    ) -> Result<(Vec<entity::api_request_log::Model>, u64), DbErr> {
        let paginator = entity::prelude::ApiRequestLog::find()
            .order_by_desc(entity::api_request_log::Column::CreatedAt)
            .order_by_desc(entity::api_request_log::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entries = paginator.fetch_page(page).await?;

        Ok((entries, total))
    }
}
