use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_activity_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub admin_id: i32,
    pub activity_type: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<String>,
    pub before_state: Option<Json>,
    pub after_state: Option<Json>,
    pub details: Option<Json>,
    pub success: bool,
    pub ip_address: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
