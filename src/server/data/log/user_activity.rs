use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::log::UserActivityLogParams;

pub struct UserActivityLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserActivityLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: UserActivityLogParams,
    ) -> Result<entity::user_activity_log::Model, DbErr> {
        entity::user_activity_log::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            activity_type: ActiveValue::Set(params.activity_type),
            resource_type: ActiveValue::Set(params.resource_type),
            resource_id: ActiveValue::Set(params.resource_id),
            ip_address: ActiveValue::Set(params.client.ip_address),
            user_agent: ActiveValue::Set(params.client.user_agent),
            metadata: ActiveValue::Set(params.metadata),
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
    ) -> Result<(Vec<entity::user_activity_log::Model>, u64), DbErr> {
        let mut query = entity::prelude::UserActivityLog::find();
        if let Some(user_id) = user_id {
            query = query.filter(entity::user_activity_log::Column::UserId.eq(user_id));
        }

        let paginator = query
            .order_by_desc(entity::user_activity_log::Column::CreatedAt)
            .order_by_desc(entity::user_activity_log::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entries = paginator.fetch_page(page).await?;

        Ok((entries, total))
    }
}
