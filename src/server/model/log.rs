//! Log record parameters and listing conversions.
//!
//! Every log table is append-only. Services build one of the `*LogParams` types and hand
//! it to `LogService`, which performs a single insert per record.

use serde_json::Value;

use crate::model::log::{
    AdminActivityLogDto, ApiRequestLogDto, AuthenticationLogDto, PerformanceLogDto,
    SearchLogDto, UserActivityLogDto,
};

/// Caller metadata copied into log records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    /// Request path, recorded in authentication failure details
    pub path: Option<String>,
}

/// Kind of authentication event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    Login,
    Register,
    /// Bearer token check on a protected route
    Authentication,
    TokenRefresh,
    PasswordReset,
    PasswordChange,
}

impl AuthEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Authentication => "authentication",
            Self::TokenRefresh => "token_refresh",
            Self::PasswordReset => "password_reset",
            Self::PasswordChange => "password_change",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthenticationLogParams {
    pub user_id: Option<i32>,
    pub event: AuthEvent,
    pub success: bool,
    pub failure_reason: Option<String>,
    pub client: ClientInfo,
    pub details: Option<Value>,
}

impl AuthenticationLogParams {
    pub fn success(event: AuthEvent, user_id: i32, client: &ClientInfo) -> Self {
        Self {
            user_id: Some(user_id),
            event,
            success: true,
            failure_reason: None,
            client: client.clone(),
            details: None,
        }
    }

    pub fn failure(
        event: AuthEvent,
        user_id: Option<i32>,
        reason: &str,
        client: &ClientInfo,
    ) -> Self {
        Self {
            user_id,
            event,
            success: false,
            failure_reason: Some(reason.to_string()),
            client: client.clone(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiRequestLogParams {
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
}

#[derive(Debug, Clone)]
pub struct PerformanceLogParams {
    /// Subsystem that measured the operation, e.g. `api`
    pub component: String,
    pub operation: String,
    pub duration_ms: i64,
    pub endpoint: Option<String>,
    pub user_id: Option<i32>,
    pub admin_id: Option<i32>,
    pub details: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct UserActivityLogParams {
    pub user_id: i32,
    /// Upper snake case activity name such as `FAVORITE_ADD`
    pub activity_type: String,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub client: ClientInfo,
    pub metadata: Option<Value>,
}

impl UserActivityLogParams {
    pub fn new(user_id: i32, activity_type: &str, client: &ClientInfo) -> Self {
        Self {
            user_id,
            activity_type: activity_type.to_string(),
            resource_type: None,
            resource_id: None,
            client: client.clone(),
            metadata: None,
        }
    }

    pub fn resource(mut self, resource_type: &str, resource_id: impl ToString) -> Self {
        self.resource_type = Some(resource_type.to_string());
        self.resource_id = Some(resource_id.to_string());
        self
    }

    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Kind of admin mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Create,
    Update,
    Delete,
    Upload,
}

impl AdminAction {
    /// Value stored in `activity_type`.
    pub fn activity_type(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Upload => "UPLOAD",
        }
    }

    /// Value stored in `action`.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Upload => "upload",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminActivityLogParams {
    pub admin_id: i32,
    pub action: AdminAction,
    pub resource_type: String,
    pub resource_id: Option<String>,
    pub before_state: Option<Value>,
    pub after_state: Option<Value>,
    pub details: Option<Value>,
    pub success: bool,
    pub ip_address: Option<String>,
}

impl AdminActivityLogParams {
    pub fn new(admin_id: i32, action: AdminAction, resource_type: &str, client: &ClientInfo) -> Self {
        Self {
            admin_id,
            action,
            resource_type: resource_type.to_string(),
            resource_id: None,
            before_state: None,
            after_state: None,
            details: None,
            success: true,
            ip_address: client.ip_address.clone(),
        }
    }

    pub fn resource_id(mut self, resource_id: impl ToString) -> Self {
        self.resource_id = Some(resource_id.to_string());
        self
    }

    pub fn before(mut self, state: Value) -> Self {
        self.before_state = Some(state);
        self
    }

    pub fn after(mut self, state: Value) -> Self {
        self.after_state = Some(state);
        self
    }

    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[derive(Debug, Clone)]
pub struct SearchLogParams {
    pub query: String,
    /// `books`, `authors`, `categories` or `all`
    pub search_type: String,
    pub results_count: i32,
    pub user_id: Option<i32>,
    pub filters: Option<Value>,
    pub duration_ms: i64,
}

/// The six log tables exposed through the admin listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Authentication,
    ApiRequest,
    Performance,
    UserActivity,
    AdminActivity,
    Search,
}

impl LogKind {
    /// Parses the path segment of `/admin/logs/{kind}`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "authentication" => Some(Self::Authentication),
            "api-requests" | "api_requests" => Some(Self::ApiRequest),
            "performance" => Some(Self::Performance),
            "user-activity" | "user_activity" => Some(Self::UserActivity),
            "admin-activity" | "admin_activity" => Some(Self::AdminActivity),
            "search" => Some(Self::Search),
            _ => None,
        }
    }
}

pub fn authentication_log_dto(m: entity::authentication_log::Model) -> AuthenticationLogDto {
    AuthenticationLogDto {
        id: m.id,
        user_id: m.user_id,
        event_type: m.event_type,
        status: m.status,
        is_success: m.is_success,
        failure_reason: m.failure_reason,
        ip_address: m.ip_address,
        user_agent: m.user_agent,
        details: m.details,
        created_at: m.created_at,
    }
}

pub fn api_request_log_dto(m: entity::api_request_log::Model) -> ApiRequestLogDto {
    ApiRequestLogDto {
        id: m.id,
        endpoint: m.endpoint,
        method: m.method,
        status_code: m.status_code,
        duration_ms: m.duration_ms,
        user_id: m.user_id,
        admin_id: m.admin_id,
        client_ip: m.client_ip,
        user_agent: m.user_agent,
        correlation_id: m.correlation_id,
        query_params: m.query_params,
        created_at: m.created_at,
    }
}

pub fn performance_log_dto(m: entity::performance_log::Model) -> PerformanceLogDto {
    PerformanceLogDto {
        id: m.id,
        component: m.component,
        operation: m.operation,
        duration_ms: m.duration_ms,
        endpoint: m.endpoint,
        user_id: m.user_id,
        admin_id: m.admin_id,
        details: m.details,
        created_at: m.created_at,
    }
}

pub fn user_activity_log_dto(m: entity::user_activity_log::Model) -> UserActivityLogDto {
    UserActivityLogDto {
        id: m.id,
        user_id: m.user_id,
        activity_type: m.activity_type,
        resource_type: m.resource_type,
        resource_id: m.resource_id,
        ip_address: m.ip_address,
        user_agent: m.user_agent,
        metadata: m.metadata,
        created_at: m.created_at,
    }
}

pub fn admin_activity_log_dto(m: entity::admin_activity_log::Model) -> AdminActivityLogDto {
    AdminActivityLogDto {
        id: m.id,
        admin_id: m.admin_id,
        activity_type: m.activity_type,
        action: m.action,
        resource_type: m.resource_type,
        resource_id: m.resource_id,
        before_state: m.before_state,
        after_state: m.after_state,
        details: m.details,
        success: m.success,
        ip_address: m.ip_address,
        created_at: m.created_at,
    }
}

pub fn search_log_dto(m: entity::search_log::Model) -> SearchLogDto {
    SearchLogDto {
        id: m.id,
        query: m.query,
        search_type: m.search_type,
        results_count: m.results_count,
        user_id: m.user_id,
        filters: m.filters,
        duration_ms: m.duration_ms,
        created_at: m.created_at,
    }
}
