use async_trait::async_trait;
use rusoto_ec2::{
    DescribeInstancesRequest, Ec2, Ec2Client, Filter, InstanceStateChange, StartInstancesRequest,
    StopInstancesRequest, Tag,
};

use crate::error::SchedulerError;
use crate::instance::{ComputeInstance, InstanceTransition};
use crate::tag::{ResourceTag, TagSelector};

const PAGE_SIZE: i64 = 100;

#[async_trait]
pub trait ComputeInstances {
    async fn list_tagged_instances(
        &self,
        selector: &TagSelector,
    ) -> Result<Vec<ComputeInstance>, SchedulerError>;

    async fn start_instances(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<Vec<InstanceTransition>, SchedulerError>;

    async fn stop_instances(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<Vec<InstanceTransition>, SchedulerError>;
}

pub struct Ec2InstanceClient {
    client: Ec2Client,
}

#[async_trait]
impl ComputeInstances for Ec2InstanceClient {
    async fn list_tagged_instances(
        &self,
        selector: &TagSelector,
    ) -> Result<Vec<ComputeInstance>, SchedulerError> {
        let mut compute_instances = Vec::<ComputeInstance>::new();
        let mut next_token = None;
        loop {
            let request = DescribeInstancesRequest {
                filters: Some(vec![Filter {
                    name: Some(format!("tag:{}", selector.key)),
                    values: Some(vec![selector.value.clone()]),
                }]),
                max_results: Some(PAGE_SIZE),
                next_token: next_token.take(),
                ..DescribeInstancesRequest::default()
            };

            let result = self.client.describe_instances(request).await?;

            for reservation in result.reservations.unwrap_or_default() {
                for instance in reservation.instances.unwrap_or_default() {
                    compute_instances.push(ComputeInstance {
                        instance_id: instance.instance_id.ok_or(SchedulerError::NoneValue)?,
                        tags: to_resource_tags(instance.tags),
                    })
                }
            }

            match result.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }
        Ok(compute_instances)
    }

    async fn start_instances(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<Vec<InstanceTransition>, SchedulerError> {
        let request = StartInstancesRequest {
            instance_ids,
            ..StartInstancesRequest::default()
        };
        let result = self.client.start_instances(request).await?;
        to_transitions(result.starting_instances)
    }

    async fn stop_instances(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<Vec<InstanceTransition>, SchedulerError> {
        let request = StopInstancesRequest {
            instance_ids,
            ..StopInstancesRequest::default()
        };
        let result = self.client.stop_instances(request).await?;
        to_transitions(result.stopping_instances)
    }
}

impl Ec2InstanceClient {
    pub fn new_with_client(client: Ec2Client) -> Self {
        Ec2InstanceClient { client }
    }
}

fn to_resource_tags(tags: Option<Vec<Tag>>) -> Vec<ResourceTag> {
    tags.unwrap_or_default()
        .into_iter()
        .filter_map(|tag| ResourceTag::from_parts(tag.key, tag.value))
        .collect()
}

fn to_transitions(
    changes: Option<Vec<InstanceStateChange>>,
) -> Result<Vec<InstanceTransition>, SchedulerError> {
    changes
        .unwrap_or_default()
        .into_iter()
        .map(|change| {
            Ok(InstanceTransition {
                instance_id: change.instance_id.ok_or(SchedulerError::NoneValue)?,
                previous_state: change.previous_state.and_then(|state| state.name),
                current_state: change.current_state.and_then(|state| state.name),
            })
        })
        .collect()
}
