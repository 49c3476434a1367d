use tracing::info;

use crate::ec2_instance_client::ComputeInstances;
use crate::error::SchedulerError;
use crate::instance::{ComputeInstance, InstanceTransition};
use crate::schedule::ScheduleAction;
use crate::tag::{filter_by_tag, TagSelector};

pub struct ComputeScheduler<'a, C> {
    client: &'a C,
}

impl<'a, C: ComputeInstances> ComputeScheduler<'a, C> {
    pub fn new(client: &'a C) -> Self {
        ComputeScheduler { client }
    }

    pub async fn tagged_instances(
        &self,
        selector: &TagSelector,
    ) -> Result<Vec<ComputeInstance>, SchedulerError> {
        let instances = self.client.list_tagged_instances(selector).await?;
        Ok(filter_by_tag(instances, selector, |instance| {
            instance.tags.as_slice()
        }))
    }

    /// Fetches, logs and acts on the tagged instances. Errors from the
    /// provider are returned as-is.
    pub async fn schedule(
        &self,
        action: ScheduleAction,
        selector: &TagSelector,
    ) -> Result<Vec<InstanceTransition>, SchedulerError> {
        let instances = self.tagged_instances(selector).await?;
        info!(
            "Target EC2 instances: {:?}",
            instances
                .iter()
                .map(|instance| (instance.instance_id.as_str(), instance.name()))
                .collect::<Vec<_>>()
        );
        self.run(action, instances).await
    }

    /// One bulk call for the whole set. The call only requests the
    /// transition; it does not wait for the target state.
    pub async fn run(
        &self,
        action: ScheduleAction,
        instances: Vec<ComputeInstance>,
    ) -> Result<Vec<InstanceTransition>, SchedulerError> {
        let instance_ids: Vec<String> = instances
            .into_iter()
            .map(|instance| instance.instance_id)
            .collect();

        let transitions = match action {
            ScheduleAction::Start => {
                info!("Start EC2 instances");
                if instance_ids.is_empty() {
                    info!("No EC2 instances to start");
                    return Ok(vec![]);
                }
                self.client.start_instances(instance_ids).await?
            }
            ScheduleAction::Stop => {
                info!("Stop EC2 instances");
                if instance_ids.is_empty() {
                    info!("No EC2 instances to stop");
                    return Ok(vec![]);
                }
                self.client.stop_instances(instance_ids).await?
            }
            ScheduleAction::Unknown => return Ok(vec![]),
        };
        info!("{:?}", transitions);
        Ok(transitions)
    }
}
