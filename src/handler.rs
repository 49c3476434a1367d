use tracing::info;

use crate::compute_scheduler::ComputeScheduler;
use crate::config::SchedulerConfig;
use crate::database_scheduler::DatabaseScheduler;
use crate::ec2_instance_client::ComputeInstances;
use crate::error::SchedulerError;
use crate::rds_instance_client::DatabaseInstances;
use crate::schedule::{ScheduleAction, ScheduleEvent};

pub struct StateSchedulerHandler<C, D> {
    config: SchedulerConfig,
    compute: C,
    database: D,
}

impl<C: ComputeInstances, D: DatabaseInstances> StateSchedulerHandler<C, D> {
    pub fn new(config: SchedulerConfig, compute: C, database: D) -> Self {
        StateSchedulerHandler {
            config,
            compute,
            database,
        }
    }

    /// EC2 first, then RDS. An error in the EC2 pipeline means RDS is not
    /// touched in this invocation.
    pub async fn handle(&self, event: &ScheduleEvent) -> Result<(), SchedulerError> {
        info!("Started");
        let action = ScheduleAction::from(event);
        let selector = &self.config.selector;

        ComputeScheduler::new(&self.compute)
            .schedule(action, selector)
            .await?;
        DatabaseScheduler::new(&self.database)
            .schedule(action, selector)
            .await?;

        info!("Complete");
        Ok(())
    }
}
