use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    Dashboard, DeleteError, MonthlyReport, ReadError, WeeklyReport, WorkoutRepository,
    WorkoutSession, WorkoutSessionID, WriteError, dashboard, monthly_report, weekly_report,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<WorkoutSession>, ReadError>;
    async fn get_workout(&self, id: &WorkoutSessionID)
    -> Result<Option<WorkoutSession>, ReadError>;
    async fn save_workout(&self, session: WorkoutSession) -> Result<WorkoutSession, WriteError>;
    async fn delete_workout(&self, id: &WorkoutSessionID)
    -> Result<WorkoutSessionID, DeleteError>;

    async fn get_weekly_report(&self, reference: NaiveDate) -> Result<WeeklyReport, ReadError> {
        Ok(weekly_report(&self.get_workouts().await?, reference))
    }

    async fn get_monthly_report(&self, reference: NaiveDate) -> Result<MonthlyReport, ReadError> {
        Ok(monthly_report(&self.get_workouts().await?, reference))
    }

    async fn get_dashboard(&self, today: NaiveDate, recent: usize) -> Result<Dashboard, ReadError> {
        Ok(dashboard(&self.get_workouts().await?, today, recent))
    }
}

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<WorkoutSession>, ReadError> {
        log_on_error!(
            self.repository.get_all_workouts(),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_workout(
        &self,
        id: &WorkoutSessionID,
    ) -> Result<Option<WorkoutSession>, ReadError> {
        log_on_error!(self.repository.get_workout(id), ReadError, "get", "workout")
    }

    async fn save_workout(&self, session: WorkoutSession) -> Result<WorkoutSession, WriteError> {
        if let Err(err) = session.validate() {
            debug!("rejected workout {}: {err}", session.id);
            return Err(err.into());
        }
        log_on_error!(
            self.repository.save_workout(session),
            WriteError,
            "save",
            "workout"
        )
    }

    async fn delete_workout(
        &self,
        id: &WorkoutSessionID,
    ) -> Result<WorkoutSessionID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}
