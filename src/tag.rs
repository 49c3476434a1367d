/// A key/value pair attached to an EC2 or RDS resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceTag {
    pub key: String,
    pub value: String,
}

impl ResourceTag {
    pub fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        ResourceTag {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Builds a tag from the optional fields of a provider tag shape. A tag
    /// without a key is dropped; a missing value is read as empty.
    pub fn from_parts(key: Option<String>, value: Option<String>) -> Option<Self> {
        key.map(|key| ResourceTag::new(key, value.unwrap_or_default()))
    }
}

/// The tag a resource must carry to be scheduled. Read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct TagSelector {
    pub key: String,
    pub value: String,
}

impl TagSelector {
    pub fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        TagSelector {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Case-sensitive exact match on both key and value.
    pub fn matches(&self, tags: &[ResourceTag]) -> bool {
        tags.iter()
            .any(|tag| tag.key == self.key && tag.value == self.value)
    }
}

/// Keeps the items whose tags, as returned by `tags_of`, contain the selector pair.
pub fn filter_by_tag<T, F>(items: Vec<T>, selector: &TagSelector, tags_of: F) -> Vec<T>
where
    F: Fn(&T) -> &[ResourceTag],
{
    items
        .into_iter()
        .filter(|item| selector.matches(tags_of(item)))
        .collect()
}
