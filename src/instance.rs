use crate::tag::ResourceTag;

const NAME_TAG: &str = "Name";

#[derive(Debug, Clone, PartialEq)]
pub struct ComputeInstance {
    pub instance_id: String,
    pub tags: Vec<ResourceTag>,
}

impl ComputeInstance {
    /// Value of the `Name` tag, empty when the instance has none.
    pub fn name(&self) -> &str {
        self.tags
            .iter()
            .find(|tag| tag.key == NAME_TAG)
            .map_or("", |tag| tag.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseInstance {
    pub identifier: String,
    pub arn: String,
    pub status: String,
    /// Filled by a separate tag lookup keyed by `arn`.
    pub tags: Vec<ResourceTag>,
}

/// A state change requested from the provider, as reported in its response.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceTransition {
    pub instance_id: String,
    pub previous_state: Option<String>,
    pub current_state: Option<String>,
}
