use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "performance_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub component: String,
    pub operation: String,
    pub duration_ms: i64,
    pub endpoint: Option<String>,
    pub user_id: Option<i32>,
    pub admin_id: Option<i32>,
    pub details: Option<Json>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
