use crate::error::SchedulerError;
use crate::tag::TagSelector;
use std::env;

pub const TAG_KEY_VAR: &str = "TagKey";
pub const TAG_VALUE_VAR: &str = "TagValue";

#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    pub selector: TagSelector,
}

impl SchedulerConfig {
    pub fn from_env() -> Result<Self, SchedulerError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SchedulerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(SchedulerError::MissingConfig(name))
        };
        let key = required(TAG_KEY_VAR)?;
        let value = required(TAG_VALUE_VAR)?;
        Ok(SchedulerConfig {
            selector: TagSelector::new(key, value),
        })
    }
}
