//! Presence record entity: one row per (employee, date).

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "presence_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub first_activity_at: Option<DateTimeUtc>,
    pub last_activity_at: Option<DateTimeUtc>,
    pub total_active_seconds: i64,
    /// present, half_day, absent, leave
    pub status: String,
    pub leave_request_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
    #[sea_orm(
        belongs_to = "super::leave_request::Entity",
        from = "Column::LeaveRequestId",
        to = "super::leave_request::Column::Id",
        on_delete = "SetNull"
    )]
    LeaveRequest,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::leave_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
