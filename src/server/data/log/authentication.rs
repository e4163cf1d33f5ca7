use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::log::AuthenticationLogParams;

pub struct AuthenticationLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthenticationLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: AuthenticationLogParams,
    ) -> Result<entity::authentication_log::Model, DbErr> {
        entity::authentication_log::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            event_type: ActiveValue::Set(params.event.as_str().to_string()),
            status: ActiveValue::Set(if params.success { "success" } else { "failure" }.to_string()),
            is_success: ActiveValue::Set(params.success),
            failure_reason: ActiveValue::Set(params.failure_reason),
            ip_address: ActiveValue::Set(params.client.ip_address),
            user_agent: ActiveValue::Set(params.client.user_agent),
            details: ActiveValue::Set(params.details),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Gets authentication events newest first, optionally for one user.
    pub async fn get_paginated(
        &self,
        page: u64,
        per_page: u64,
        user_id: Option<i32>,
    ) -> Result<(Vec<entity::authentication_log::Model>, u64), DbErr> {
        let mut query = entity::prelude::AuthenticationLog::find();
        if let Some(user_id) = user_id {
            query = query.filter(entity::authentication_log::Column::UserId.eq(user_id));
        }

        let paginator = query
            .order_by_desc(entity::authentication_log::Column::CreatedAt)
            .order_by_desc(entity::authentication_log::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entries = paginator.fetch_page(page).await?;

        Ok((entries, total))
    }
}
