use tracing::{error, info};

use crate::error::SchedulerError;
use crate::instance::{DatabaseInstance, InstanceTransition};
use crate::rds_instance_client::DatabaseInstances;
use crate::schedule::ScheduleAction;
use crate::tag::{filter_by_tag, TagSelector};

const STOPPED: &str = "stopped";
const AVAILABLE: &str = "available";

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedInstance {
    pub identifier: String,
    pub status: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct DatabaseRunReport {
    pub acted: Vec<InstanceTransition>,
    pub skipped: Vec<SkippedInstance>,
}

pub struct DatabaseScheduler<'a, D> {
    client: &'a D,
}

impl<'a, D: DatabaseInstances> DatabaseScheduler<'a, D> {
    pub fn new(client: &'a D) -> Self {
        DatabaseScheduler { client }
    }

    /// Lists every instance, resolves its tags one ARN at a time, then keeps
    /// the ones carrying the selector pair.
    pub async fn tagged_instances(
        &self,
        selector: &TagSelector,
    ) -> Result<Vec<DatabaseInstance>, SchedulerError> {
        let mut instances = self.client.list_instances().await?;
        for instance in instances.iter_mut() {
            instance.tags = self.client.list_tags(&instance.arn).await?;
        }
        Ok(filter_by_tag(instances, selector, |instance| {
            instance.tags.as_slice()
        }))
    }

    pub async fn schedule(
        &self,
        action: ScheduleAction,
        selector: &TagSelector,
    ) -> Result<DatabaseRunReport, SchedulerError> {
        let instances = self.tagged_instances(selector).await?;
        info!(
            "Target RDS instances: {:?}",
            instances
                .iter()
                .map(|instance| instance.identifier.as_str())
                .collect::<Vec<_>>()
        );
        self.run(action, instances).await
    }

    /// Acts on each instance individually, only when its status allows the
    /// transition. A failed call does not stop the loop; all failures are
    /// returned together once every instance has been tried.
    pub async fn run(
        &self,
        action: ScheduleAction,
        instances: Vec<DatabaseInstance>,
    ) -> Result<DatabaseRunReport, SchedulerError> {
        let required_status = match action {
            ScheduleAction::Start => {
                info!("Start RDS instances");
                STOPPED
            }
            ScheduleAction::Stop => {
                info!("Stop RDS instances");
                AVAILABLE
            }
            ScheduleAction::Unknown => return Ok(DatabaseRunReport::default()),
        };

        let mut report = DatabaseRunReport::default();
        let mut failures = Vec::new();
        for instance in instances {
            if instance.status != required_status {
                info!(
                    "{} status is not \"{}\" ({})",
                    instance.identifier, required_status, instance.status
                );
                report.skipped.push(SkippedInstance {
                    identifier: instance.identifier,
                    status: instance.status,
                });
                continue;
            }

            let result = match action {
                ScheduleAction::Start => self.client.start_instance(&instance.identifier).await,
                _ => self.client.stop_instance(&instance.identifier).await,
            };
            match result {
                Ok(transition) => {
                    info!("{:?}", transition);
                    report.acted.push(transition);
                }
                Err(e) => {
                    error!("{}: {}", instance.identifier, e);
                    failures.push((instance.identifier, e));
                }
            }
        }

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(SchedulerError::DatabaseBatch(failures))
        }
    }
}
