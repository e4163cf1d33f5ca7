//! Fan-out of structured events into the six log tables.
//!
//! Every `record_*` call performs exactly one insert. A failed insert is reported through
//! `tracing::warn!` and swallowed so the calling operation still completes.

use sea_orm::{DatabaseConnection, DbErr};

use crate::{
    model::{api::PaginatedDto, log::LogEntryDto},
    server::{
        data::log::{
            admin_activity::AdminActivityLogRepository, api_request::ApiRequestLogRepository,
            authentication::AuthenticationLogRepository, performance::PerformanceLogRepository,
            search::SearchLogRepository, user_activity::UserActivityLogRepository,
        },
        error::AppError,
        model::{
            log::{
                admin_activity_log_dto, api_request_log_dto, authentication_log_dto,
                performance_log_dto, search_log_dto, user_activity_log_dto,
                AdminActivityLogParams, ApiRequestLogParams, AuthenticationLogParams, LogKind,
                PerformanceLogParams, SearchLogParams, UserActivityLogParams,
            },
            page::{Page, PageParams},
        },
    },
};

pub struct LogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LogService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record_authentication(&self, params: AuthenticationLogParams) {
        let result = AuthenticationLogRepository::new(self.db).create(params).await;
        warn_on_failure("authentication", result);
    }

    pub async fn record_api_request(&self, params: ApiRequestLogParams) {
        let result = ApiRequestLogRepository::new(self.db).create(params).await;
        warn_on_failure("api_request", result);
    }

    pub async fn record_performance(&self, params: PerformanceLogParams) {
        let result = PerformanceLogRepository::new(self.db).create(params).await;
        warn_on_failure("performance", result);
    }

    pub async fn record_user_activity(&self, params: UserActivityLogParams) {
        let result = UserActivityLogRepository::new(self.db).create(params).await;
        warn_on_failure("user_activity", result);
    }

    pub async fn record_admin_activity(&self, params: AdminActivityLogParams) {
        let result = AdminActivityLogRepository::new(self.db).create(params).await;
        warn_on_failure("admin_activity", result);
    }

    pub async fn record_search(&self, params: SearchLogParams) {
        let result = SearchLogRepository::new(self.db).create(params).await;
        warn_on_failure("search", result);
    }

    /// Lists one log table newest first.
    ///
    /// # Arguments
    /// - `kind` - Which of the six tables to read
    /// - `params` - Page number and size
    /// - `user_id` - Optional filter, honored by the authentication, user activity and
    ///   search tables and ignored by the rest
    ///
    /// # Returns
    /// - `Ok(PaginatedDto<LogEntryDto>)` - One page of entries
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn list(
        &self,
        kind: LogKind,
        params: PageParams,
        user_id: Option<i32>,
    ) -> Result<PaginatedDto<LogEntryDto>, AppError> {
        let PageParams { page, per_page } = params;

        let (items, total): (Vec<LogEntryDto>, u64) = match kind {
            LogKind::Authentication => {
                let (rows, total) = AuthenticationLogRepository::new(self.db)
                    .get_paginated(page, per_page, user_id)
                    .await?;
                (
                    rows.into_iter()
                        .map(|m| LogEntryDto::Authentication(authentication_log_dto(m)))
                        .collect(),
                    total,
                )
            }
            LogKind::ApiRequest => {
                let (rows, total) = ApiRequestLogRepository::new(self.db)
                    .get_paginated(page, per_page)
                    .await?;
                (
                    rows.into_iter()
                        .map(|m| LogEntryDto::ApiRequest(api_request_log_dto(m)))
                        .collect(),
                    total,
                )
            }
            LogKind::Performance => {
                let (rows, total) = PerformanceLogRepository::new(self.db)
                    .get_paginated(page, per_page)
                    .await?;
                (
                    rows.into_iter()
                        .map(|m| LogEntryDto::Performance(performance_log_dto(m)))
                        .collect(),
                    total,
                )
            }
            LogKind::UserActivity => {
                let (rows, total) = UserActivityLogRepository::new(self.db)
                    .get_paginated(page, per_page, user_id)
                    .await?;
                (
                    rows.into_iter()
                        .map(|m| LogEntryDto::UserActivity(user_activity_log_dto(m)))
                        .collect(),
                    total,
                )
            }
            LogKind::AdminActivity => {
                let (rows, total) = AdminActivityLogRepository::new(self.db)
                    .get_paginated(page, per_page)
                    .await?;
                (
                    rows.into_iter()
                        .map(|m| LogEntryDto::AdminActivity(admin_activity_log_dto(m)))
                        .collect(),
                    total,
                )
            }
            LogKind::Search => {
                let (rows, total) = SearchLogRepository::new(self.db)
                    .get_paginated(page, per_page, user_id)
                    .await?;
                (
                    rows.into_iter()
                        .map(|m| LogEntryDto::Search(search_log_dto(m)))
                        .collect(),
                    total,
                )
            }
        };

        Ok(Page::new(items, total, params).into_dto(|entry| entry))
    }
}

fn warn_on_failure<T>(table: &str, result: Result<T, DbErr>) {
    if let Err(err) = result {
        tracing::warn!("Failed to write {} log: {}", table, err);
    }
}
