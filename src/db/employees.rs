//! Database queries for employees.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entity::employee::{self, Entity as EmployeeEntity};
use crate::error::{AppError, AppResult};
use crate::models::Employee;

use super::DbPool;

impl DbPool {
    /// Find a non-deleted employee of an organization.
    pub async fn get_employee(
        &self,
        organization_id: Uuid,
        employee_id: Uuid,
    ) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find_by_id(employee_id)
            .filter(employee::Column::OrganizationId.eq(organization_id))
            .filter(employee::Column::DeletedAt.is_null())
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get employee: {}", e)))?;

        Ok(result.map(model_to_employee))
    }

    /// All active, non-deleted employees of an organization.
    pub async fn list_active_employees(&self, organization_id: Uuid) -> AppResult<Vec<Employee>> {
        let result = EmployeeEntity::find()
            .filter(employee::Column::OrganizationId.eq(organization_id))
            .filter(employee::Column::IsActive.eq(true))
            .filter(employee::Column::DeletedAt.is_null())
            .order_by_asc(employee::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list employees: {}", e)))?;

        Ok(result.into_iter().map(model_to_employee).collect())
    }
}

fn model_to_employee(m: employee::Model) -> Employee {
    Employee {
        id: m.id,
        organization_id: m.organization_id,
        email: m.email,
        full_name: m.full_name,
        is_active: m.is_active,
    }
}
