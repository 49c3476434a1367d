use std::error::Error;

use rusoto_core::RusotoError;
use rusoto_ec2::{DescribeInstancesError, StartInstancesError, StopInstancesError};
use rusoto_rds::{
    DescribeDBInstancesError, ListTagsForResourceError, StartDBInstanceError, StopDBInstanceError,
};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq)]
pub enum SchedulerError {
    MissingConfig(&'static str),
    NoneValue,
    DescribeInstancesError(RusotoError<DescribeInstancesError>),
    StartInstancesError(RusotoError<StartInstancesError>),
    StopInstancesError(RusotoError<StopInstancesError>),
    DescribeDbInstancesError(RusotoError<DescribeDBInstancesError>),
    ListTagsForResourceError(RusotoError<ListTagsForResourceError>),
    StartDbInstanceError(RusotoError<StartDBInstanceError>),
    StopDbInstanceError(RusotoError<StopDBInstanceError>),
    /// Every database instance whose start/stop call failed, in loop order.
    DatabaseBatch(Vec<(String, SchedulerError)>),
}

impl Display for SchedulerError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            SchedulerError::MissingConfig(name) => {
                write!(f, "Required environment variable {} is not set", name)
            }
            SchedulerError::NoneValue => write!(f, "Value is None"),
            SchedulerError::DescribeInstancesError(ref error) => Display::fmt(error, f),
            SchedulerError::StartInstancesError(ref error) => Display::fmt(error, f),
            SchedulerError::StopInstancesError(ref error) => Display::fmt(error, f),
            SchedulerError::DescribeDbInstancesError(ref error) => Display::fmt(error, f),
            SchedulerError::ListTagsForResourceError(ref error) => Display::fmt(error, f),
            SchedulerError::StartDbInstanceError(ref error) => Display::fmt(error, f),
            SchedulerError::StopDbInstanceError(ref error) => Display::fmt(error, f),
            SchedulerError::DatabaseBatch(ref failures) => {
                write!(f, "{} RDS instance command(s) failed:", failures.len())?;
                for (identifier, error) in failures {
                    write!(f, " [{}: {}]", identifier, error)?;
                }
                Ok(())
            }
        }
    }
}

impl Error for SchedulerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            SchedulerError::DescribeInstancesError(ref error) => Some(error),
            SchedulerError::StartInstancesError(ref error) => Some(error),
            SchedulerError::StopInstancesError(ref error) => Some(error),
            SchedulerError::DescribeDbInstancesError(ref error) => Some(error),
            SchedulerError::ListTagsForResourceError(ref error) => Some(error),
            SchedulerError::StartDbInstanceError(ref error) => Some(error),
            SchedulerError::StopDbInstanceError(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<RusotoError<DescribeInstancesError>> for SchedulerError {
    fn from(e: RusotoError<DescribeInstancesError>) -> SchedulerError {
        SchedulerError::DescribeInstancesError(e)
    }
}

impl From<RusotoError<StartInstancesError>> for SchedulerError {
    fn from(e: RusotoError<StartInstancesError>) -> SchedulerError {
        SchedulerError::StartInstancesError(e)
    }
}

impl From<RusotoError<StopInstancesError>> for SchedulerError {
    fn from(e: RusotoError<StopInstancesError>) -> SchedulerError {
        SchedulerError::StopInstancesError(e)
    }
}

impl From<RusotoError<DescribeDBInstancesError>> for SchedulerError {
    fn from(e: RusotoError<DescribeDBInstancesError>) -> SchedulerError {
        SchedulerError::DescribeDbInstancesError(e)
    }
}

impl From<RusotoError<ListTagsForResourceError>> for SchedulerError {
    fn from(e: RusotoError<ListTagsForResourceError>) -> SchedulerError {
        SchedulerError::ListTagsForResourceError(e)
    }
}

impl From<RusotoError<StartDBInstanceError>> for SchedulerError {
    fn from(e: RusotoError<StartDBInstanceError>) -> SchedulerError {
        SchedulerError::StartDbInstanceError(e)
    }
}

impl From<RusotoError<StopDBInstanceError>> for SchedulerError {
    fn from(e: RusotoError<StopDBInstanceError>) -> SchedulerError {
        SchedulerError::StopDbInstanceError(e)
    }
}
