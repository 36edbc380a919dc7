use std::sync::Arc;

use tracing::warn;

use crate::db::{ScheduleRepository, UserRepository};
use crate::error::AppError;
use crate::models::Schedule;

/// Resolves the schedule owned by the calling user.
///
/// Sign-up writes the user and the schedule separately, so a user without a
/// schedule is possible and is reported as `ScheduleNotFound`.
#[derive(Clone)]
pub struct ScheduleScope {
    users: Arc<dyn UserRepository>,
    schedules: Arc<dyn ScheduleRepository>,
}

impl ScheduleScope {
    pub fn new(users: Arc<dyn UserRepository>, schedules: Arc<dyn ScheduleRepository>) -> Self {
        Self { users, schedules }
    }

    pub async fn resolve(&self, user_id: i64) -> Result<Schedule, AppError> {
        let Some(user) = self.users.find_user(user_id).await? else {
            warn!("no user {} for schedule lookup", user_id);
            return Err(AppError::ScheduleNotFound);
        };

        match self.schedules.find_schedule_by_user(user.id).await? {
            Some(schedule) => Ok(schedule),
            None => {
                warn!("user {} has no schedule", user.id);
                Err(AppError::ScheduleNotFound)
            }
        }
    }
}
