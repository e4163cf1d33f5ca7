use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryOrder,
};

use crate::server::model::log::AdminActivityLogParams;

pub struct AdminActivityLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminActivityLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: AdminActivityLogParams,
    ) -> Result<entity::admin_activity_log::Model, DbErr> {
        entity::admin_activity_log::ActiveModel {
            admin_id: ActiveValue::Set(params.admin_id),
            activity_type: ActiveValue::Set(params.action.activity_type().to_string()),
            action: ActiveValue::Set(params.action.action().to_string()),
            resource_type: ActiveValue::Set(params.resource_type),
            resource_id: ActiveValue::Set(params.resource_id),
            before_state: ActiveValue::Set(params.before_state),
            after_state: ActiveValue::Set(params.after_state),
            details: ActiveValue::Set(params.details),
            success: ActiveValue::Set(params.success),
            ip_address: ActiveValue::Set(params.ip_address),
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
    ) -> Result<(Vec<entity::admin_activity_log::Model>, u64), DbErr> {
        let paginator = entity::prelude::AdminActivityLog::find()
            .order_by_desc(entity::admin_activity_log::Column::CreatedAt)
            .order_by_desc(entity::admin_activity_log::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entries = paginator.fetch_page(page).await?;

        Ok((entries, total))
    }
}
