//! Employee entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::presence_record::Entity")]
    PresenceRecords,
    #[sea_orm(has_many = "super::leave_request::Entity")]
    LeaveRequests,
}

impl Related<super::presence_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PresenceRecords.def()
    }
}

impl Related<super::leave_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
