use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthenticationLogDto {
    pub id: i32,
    pub user_id: Option<i32>,
    pub event_type: String,
    pub status: String,
    pub is_success: bool,
    pub failure_reason: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiRequestLogDto {
    pub id: i32,
    pub endpoint: String,
    pub method: String,
    pub status_code: i32,
    pub duration_ms: i64,
    pub user_id: Option<i32>,
    pub admin_id: Option<i32>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub correlation_id: String,
    pub query_params: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PerformanceLogDto {
    pub id: i32,
    pub component: String,
    pub operation: String,
    pub duration_ms: i64,
    pub endpoint: Option<String>,
    pub user_id: Option<i32>,
    pub admin_id: Option<i32>,
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserActivityLogDto {
    pub id: i32,
    pub user_id: i32,
    pub activity_type: String,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminActivityLogDto {
    pub id: i32,
    pub admin_id: i32,
    pub activity_type: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub before_state: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub after_state: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    pub success: bool,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchLogDto {
    pub id: i32,
    pub query: String,
    pub search_type: String,
    pub results_count: i32,
    pub user_id: Option<i32>,
    #[schema(value_type = Option<Object>)]
    pub filters: Option<Value>,
    pub duration_ms: i64,
    pub created_at: DateTime<Utc>,
}

/// An entry from any of the six log tables; serialized as the inner record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum LogEntryDto {
    Authentication(AuthenticationLogDto),
    ApiRequest(ApiRequestLogDto),
    Performance(PerformanceLogDto),
    UserActivity(UserActivityLogDto),
    AdminActivity(AdminActivityLogDto),
    Search(SearchLogDto),
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogQuery {
    #[serde(default)]
    pub page: u64,
    pub per_page: Option<u64>,
    /// Restrict to one user; honoured by the authentication, user activity and search logs
    pub user_id: Option<i32>,
}
