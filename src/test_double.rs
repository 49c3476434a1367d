//! In-memory stand-ins for the EC2 and RDS clients that record every call.

use async_trait::async_trait;
use rusoto_core::RusotoError;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use crate::ec2_instance_client::ComputeInstances;
use crate::error::SchedulerError;
use crate::instance::{ComputeInstance, DatabaseInstance, InstanceTransition};
use crate::rds_instance_client::DatabaseInstances;
use crate::tag::{ResourceTag, TagSelector};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListCompute,
    StartCompute(Vec<String>),
    StopCompute(Vec<String>),
    ListDatabase,
    ListTags(String),
    StartDatabase(String),
    StopDatabase(String),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::StartCompute(_)
                | Call::StopCompute(_)
                | Call::StartDatabase(_)
                | Call::StopDatabase(_)
        )
    }
}

#[derive(Default)]
pub struct FakeCompute {
    pub instances: Vec<ComputeInstance>,
    pub fail_mutations: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeCompute {
    pub fn with_instances(instances: Vec<ComputeInstance>) -> Self {
        FakeCompute {
            instances,
            ..FakeCompute::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn transitions(ids: &[String], previous: &str, current: &str) -> Vec<InstanceTransition> {
        ids.iter()
            .map(|id| InstanceTransition {
                instance_id: id.clone(),
                previous_state: Some(previous.to_string()),
                current_state: Some(current.to_string()),
            })
            .collect()
    }
}

#[async_trait]
impl ComputeInstances for FakeCompute {
    /// Returns every instance regardless of tags, like a provider whose
    /// server-side filter is looser than the exact match.
    async fn list_tagged_instances(
        &self,
        _selector: &TagSelector,
    ) -> Result<Vec<ComputeInstance>, SchedulerError> {
        self.record(Call::ListCompute);
        Ok(self.instances.clone())
    }

    async fn start_instances(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<Vec<InstanceTransition>, SchedulerError> {
        self.record(Call::StartCompute(instance_ids.clone()));
        if self.fail_mutations {
            return Err(SchedulerError::StartInstancesError(
                RusotoError::Validation("UnauthorizedOperation".to_string()),
            ));
        }
        Ok(Self::transitions(&instance_ids, "stopped", "pending"))
    }

    async fn stop_instances(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<Vec<InstanceTransition>, SchedulerError> {
        self.record(Call::StopCompute(instance_ids.clone()));
        if self.fail_mutations {
            return Err(SchedulerError::StopInstancesError(
                RusotoError::Validation("UnauthorizedOperation".to_string()),
            ));
        }
        Ok(Self::transitions(&instance_ids, "running", "stopping"))
    }
}

#[derive(Default)]
pub struct FakeDatabase {
    pub instances: Vec<DatabaseInstance>,
    /// Tags returned by the lookup, keyed by ARN.
    pub tags: HashMap<String, Vec<ResourceTag>>,
    /// Identifiers whose start/stop call fails.
    pub failing: Vec<String>,
    pub fail_listing: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeDatabase {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn add(&mut self, identifier: &str, status: &str, tags: Vec<ResourceTag>) {
        let arn = format!("arn:aws:rds:ap-northeast-1:123456789012:db:{}", identifier);
        self.tags.insert(arn.clone(), tags);
        self.instances.push(DatabaseInstance {
            identifier: identifier.to_string(),
            arn,
            status: status.to_string(),
            tags: vec![],
        });
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn transition(&self, identifier: &str, current: &str) -> InstanceTransition {
        InstanceTransition {
            instance_id: identifier.to_string(),
            previous_state: None,
            current_state: Some(current.to_string()),
        }
    }
}

#[async_trait]
impl DatabaseInstances for FakeDatabase {
    async fn list_instances(&self) -> Result<Vec<DatabaseInstance>, SchedulerError> {
        self.record(Call::ListDatabase);
        if self.fail_listing {
            return Err(SchedulerError::DescribeDbInstancesError(
                RusotoError::Validation("AccessDenied".to_string()),
            ));
        }
        Ok(self.instances.clone())
    }

    async fn list_tags(&self, arn: &str) -> Result<Vec<ResourceTag>, SchedulerError> {
        self.record(Call::ListTags(arn.to_string()));
        Ok(self.tags.get(arn).cloned().unwrap_or_default())
    }

    async fn start_instance(
        &self,
        identifier: &str,
    ) -> Result<InstanceTransition, SchedulerError> {
        self.record(Call::StartDatabase(identifier.to_string()));
        if self.failing.iter().any(|failing| failing == identifier) {
            return Err(SchedulerError::StartDbInstanceError(
                RusotoError::Validation("InvalidDBInstanceState".to_string()),
            ));
        }
        Ok(self.transition(identifier, "starting"))
    }

    async fn stop_instance(&self, identifier: &str) -> Result<InstanceTransition, SchedulerError> {
        self.record(Call::StopDatabase(identifier.to_string()));
        if self.failing.iter().any(|failing| failing == identifier) {
            return Err(SchedulerError::StopDbInstanceError(
                RusotoError::Validation("InvalidDBInstanceState".to_string()),
            ));
        }
        Ok(self.transition(identifier, "stopping"))
    }
}

/// Collects formatted log lines so tests can assert on what an operator sees.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let buffer = self.clone();
        tracing_subscriber::fmt()
            .with_writer(move || buffer.clone())
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
