mod compute_scheduler;
mod config;
mod database_scheduler;
mod ec2_instance_client;
mod error;
mod handler;
mod instance;
mod rds_instance_client;
mod schedule;
mod tag;
#[cfg(test)]
mod test_double;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use rusoto_core::Region;
use rusoto_ec2::Ec2Client;
use rusoto_rds::RdsClient;
use tracing_subscriber::EnvFilter;

use crate::config::SchedulerConfig;
use crate::ec2_instance_client::Ec2InstanceClient;
use crate::handler::StateSchedulerHandler;
use crate::rds_instance_client::RdsInstanceClient;
use crate::schedule::ScheduleEvent;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        // CloudWatch already records ingestion time and the function name.
        .with_target(false)
        .without_time()
        .init();

    let config = SchedulerConfig::from_env()?;
    let region = Region::default();
    let handler = StateSchedulerHandler::new(
        config,
        Ec2InstanceClient::new_with_client(Ec2Client::new(region.clone())),
        RdsInstanceClient::new_with_client(RdsClient::new(region)),
    );

    let handler = &handler;
    run(service_fn(
        move |event: LambdaEvent<ScheduleEvent>| async move {
            handler.handle(&event.payload).await
        },
    ))
    .await
}
