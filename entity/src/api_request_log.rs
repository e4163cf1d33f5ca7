use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "api_request_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
