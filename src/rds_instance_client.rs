use async_trait::async_trait;
use rusoto_rds::{
    DBInstance, DescribeDBInstancesMessage, ListTagsForResourceMessage, Rds, RdsClient,
    StartDBInstanceMessage, StopDBInstanceMessage, Tag,
};

use crate::error::SchedulerError;
use crate::instance::{DatabaseInstance, InstanceTransition};
use crate::tag::ResourceTag;

const PAGE_SIZE: i64 = 100;

/// RDS exposes tags only through a per-resource lookup, so listing and tag
/// resolution are separate calls.
#[async_trait]
pub trait DatabaseInstances {
    /// All instances in the region, with `tags` left empty.
    async fn list_instances(&self) -> Result<Vec<DatabaseInstance>, SchedulerError>;

    async fn list_tags(&self, arn: &str) -> Result<Vec<ResourceTag>, SchedulerError>;

    async fn start_instance(&self, identifier: &str) -> Result<InstanceTransition, SchedulerError>;

    async fn stop_instance(&self, identifier: &str) -> Result<InstanceTransition, SchedulerError>;
}

pub struct RdsInstanceClient {
    client: RdsClient,
}

#[async_trait]
impl DatabaseInstances for RdsInstanceClient {
    async fn list_instances(&self) -> Result<Vec<DatabaseInstance>, SchedulerError> {
        let mut database_instances = Vec::<DatabaseInstance>::new();
        let mut marker = None;
        loop {
            let request = DescribeDBInstancesMessage {
                marker: marker.take(),
                max_records: Some(PAGE_SIZE),
                ..DescribeDBInstancesMessage::default()
            };

            let result = self.client.describe_db_instances(request).await?;

            for instance in result.db_instances.unwrap_or_default() {
                database_instances.push(DatabaseInstance {
                    identifier: instance
                        .db_instance_identifier
                        .ok_or(SchedulerError::NoneValue)?,
                    arn: instance.db_instance_arn.ok_or(SchedulerError::NoneValue)?,
                    status: instance.db_instance_status.unwrap_or_default(),
                    tags: vec![],
                })
            }

            match result.marker {
                Some(next) if !next.is_empty() => marker = Some(next),
                _ => break,
            }
        }
        Ok(database_instances)
    }

    async fn list_tags(&self, arn: &str) -> Result<Vec<ResourceTag>, SchedulerError> {
        let request = ListTagsForResourceMessage {
            resource_name: arn.to_string(),
            ..ListTagsForResourceMessage::default()
        };
        let result = self.client.list_tags_for_resource(request).await?;
        Ok(to_resource_tags(result.tag_list))
    }

    async fn start_instance(
        &self,
        identifier: &str,
    ) -> Result<InstanceTransition, SchedulerError> {
        let request = StartDBInstanceMessage {
            db_instance_identifier: identifier.to_string(),
            ..StartDBInstanceMessage::default()
        };
        let result = self.client.start_db_instance(request).await?;
        Ok(to_transition(identifier, result.db_instance))
    }

    async fn stop_instance(&self, identifier: &str) -> Result<InstanceTransition, SchedulerError> {
        let request = StopDBInstanceMessage {
            db_instance_identifier: identifier.to_string(),
            ..StopDBInstanceMessage::default()
        };
        let result = self.client.stop_db_instance(request).await?;
        Ok(to_transition(identifier, result.db_instance))
    }
}

impl RdsInstanceClient {
    pub fn new_with_client(client: RdsClient) -> Self {
        RdsInstanceClient { client }
    }
}

fn to_resource_tags(tags: Option<Vec<Tag>>) -> Vec<ResourceTag> {
    tags.unwrap_or_default()
        .into_iter()
        .filter_map(|tag| ResourceTag::from_parts(tag.key, tag.value))
        .collect()
}

fn to_transition(identifier: &str, instance: Option<DBInstance>) -> InstanceTransition {
    let instance = instance.unwrap_or_default();
    InstanceTransition {
        instance_id: instance
            .db_instance_identifier
            .unwrap_or_else(|| identifier.to_string()),
        previous_state: None,
        current_state: instance.db_instance_status,
    }
}
