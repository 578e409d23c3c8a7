//! Attendance derivation for one employee-day and batches of employees.

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    NewAutoLeave, PresenceRecord, PresenceStatus, PresenceUpsert, ReconcileSummary,
};

use super::classify::{AttendanceOutcome, LeaveEffect, classify, plan_leave_effect};
use super::store::AttendanceStore;

/// Reason stored on auto-detected leave rows.
pub const AUTO_LEAVE_REASON: &str = "Auto-detected from tracked activity";

/// Result of reconciling one employee-day.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub record: PresenceRecord,
    pub outcome: AttendanceOutcome,
    /// `None` on the approved-leave path.
    pub leave_effect: Option<LeaveEffect>,
    /// Whether an auto-detected leave row was inserted by this run.
    pub created_leave: bool,
}

/// Derives presence from activity and leave, one employee-day at a time.
pub struct AttendanceDeriver<'a> {
    store: &'a dyn AttendanceStore,
    default_leave_type: &'a str,
}

impl<'a> AttendanceDeriver<'a> {
    pub fn new(store: &'a dyn AttendanceStore, default_leave_type: &'a str) -> Self {
        Self {
            store,
            default_leave_type,
        }
    }

    /// Reconcile the presence record of `employee_id` on `date`.
    pub async fn reconcile(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        organization_id: Uuid,
    ) -> AppResult<PresenceRecord> {
        Ok(self
            .reconcile_detailed(employee_id, date, organization_id)
            .await?
            .record)
    }

    /// Same as [`reconcile`](Self::reconcile), also reporting the outcome and
    /// leave side effect.
    pub async fn reconcile_detailed(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        organization_id: Uuid,
    ) -> AppResult<Reconciliation> {
        // Approved leave wins; no activity aggregation, no auto-leave logic.
        if let Some(leave) = self.store.find_approved_leave(employee_id, date).await? {
            let record = self
                .store
                .upsert_presence(&PresenceUpsert {
                    organization_id,
                    employee_id,
                    date,
                    status: PresenceStatus::Leave,
                    leave_request_id: Some(leave.id),
                    activity: None,
                })
                .await?;

            debug!(%employee_id, %date, leave_request_id = %leave.id, "Approved leave covers day");

            return Ok(Reconciliation {
                record,
                outcome: AttendanceOutcome::OnLeave {
                    leave_request_id: leave.id,
                },
                leave_effect: None,
                created_leave: false,
            });
        }

        let activity = self.store.daily_activity(employee_id, date).await?;
        let band = classify(activity.total_active_seconds);
        let outcome = AttendanceOutcome::Worked { band, activity };

        let existing = self.store.find_auto_detected_leave(employee_id, date).await?;
        let effect = plan_leave_effect(band, existing.as_ref());

        let (leave_request_id, created_leave) = self
            .apply_leave_effect(effect, employee_id, date, organization_id)
            .await?;

        let record = self
            .store
            .upsert_presence(&PresenceUpsert {
                organization_id,
                employee_id,
                date,
                status: outcome.status(),
                leave_request_id,
                activity: Some(activity),
            })
            .await?;

        debug!(
            %employee_id,
            %date,
            status = %record.status,
            total_active_seconds = activity.total_active_seconds,
            created_leave,
            "Presence reconciled"
        );

        Ok(Reconciliation {
            record,
            outcome,
            leave_effect: Some(effect),
            created_leave,
        })
    }

    /// Apply a planned effect; returns the leave id to link and whether a row
    /// was created.
    async fn apply_leave_effect(
        &self,
        effect: LeaveEffect,
        employee_id: Uuid,
        date: NaiveDate,
        organization_id: Uuid,
    ) -> AppResult<(Option<Uuid>, bool)> {
        match effect {
            LeaveEffect::None | LeaveEffect::Link { .. } => Ok((effect.linked_id(), false)),
            LeaveEffect::RetainExisting { id } => {
                info!(
                    %employee_id,
                    %date,
                    leave_request_id = %id,
                    "Day resolved to present; keeping previously auto-detected leave"
                );
                Ok((Some(id), false))
            }
            LeaveEffect::Adjust { id, total_days } => {
                self.store.update_leave_total_days(id, total_days).await?;
                debug!(
                    %employee_id,
                    %date,
                    leave_request_id = %id,
                    total_days,
                    "Adjusted auto-detected leave"
                );
                Ok((Some(id), false))
            }
            LeaveEffect::Create { total_days } => {
                let Some(leave_type) = self
                    .store
                    .find_leave_type_by_name(organization_id, self.default_leave_type)
                    .await?
                else {
                    warn!(
                        %organization_id,
                        leave_type = self.default_leave_type,
                        "Default leave type not configured; skipping auto-detected leave"
                    );
                    return Ok((None, false));
                };

                let (leave, created) = self
                    .store
                    .insert_auto_detected_leave(&NewAutoLeave {
                        organization_id,
                        employee_id,
                        leave_type_id: leave_type.id,
                        date,
                        total_days,
                        reason: AUTO_LEAVE_REASON.to_string(),
                    })
                    .await?;

                // Lost a race with another writer: converge on its row.
                if !created && (leave.total_days - total_days).abs() >= f64::EPSILON {
                    self.store.update_leave_total_days(leave.id, total_days).await?;
                }

                Ok((Some(leave.id), created))
            }
        }
    }

    /// Reconcile one employee or every active employee of an organization.
    ///
    /// Each employee is an independent unit of work: failures are counted and
    /// reported without stopping the batch.
    pub async fn reconcile_batch(
        &self,
        organization_id: Uuid,
        employee_id: Option<Uuid>,
        date: NaiveDate,
    ) -> AppResult<ReconcileSummary> {
        let mut summary = ReconcileSummary::default();

        let employee_ids: Vec<Uuid> = match employee_id {
            Some(id) => match self.store.find_employee(organization_id, id).await {
                Ok(Some(employee)) => vec![employee.id],
                Ok(None) => {
                    let err = AppError::NotFound(format!("Employee {}", id));
                    warn!(employee_id = %id, "Employee not found in organization");
                    summary.record_failure(id, err.to_string());
                    Vec::new()
                }
                Err(e) => {
                    warn!(employee_id = %id, error = %e, "Employee lookup failed");
                    summary.record_failure(id, e.to_string());
                    Vec::new()
                }
            },
            None => match self.store.list_active_employees(organization_id).await {
                Ok(employees) => employees.into_iter().map(|e| e.id).collect(),
                Err(e) => {
                    warn!(%organization_id, error = %e, "Failed to list active employees");
                    summary.record_batch_failure(format!("Failed to list employees: {}", e));
                    Vec::new()
                }
            },
        };

        for id in employee_ids {
            match self.reconcile_detailed(id, date, organization_id).await {
                Ok(result) => summary.record_success(result.record.status, result.created_leave),
                Err(e) => {
                    warn!(employee_id = %id, %date, error = %e, "Attendance reconciliation failed");
                    summary.record_failure(id, e.to_string());
                }
            }
        }

        info!(
            %organization_id,
            %date,
            processed = summary.processed,
            failed = summary.failed,
            present = summary.present,
            half_day = summary.half_day,
            absent = summary.absent,
            leave = summary.leave,
            new_leave_requests = summary.new_leave_requests,
            "Attendance batch reconciled"
        );

        Ok(summary)
    }
}
