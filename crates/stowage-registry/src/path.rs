use std::fmt::{Display, Formatter, Result as FmtResult};

/// Address of a value in the configuration registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigPath {
    pub category: String,
    pub namespace: String,
    pub item: Option<String>,
}

impl ConfigPath {
    /// Path to a whole namespace.
    pub fn namespace(category: impl Into<String>, namespace: impl Into<String>) -> Self {
        ConfigPath {
            category: category.into(),
            namespace: namespace.into(),
            item: None,
        }
    }

    /// Path to a single item inside a namespace.
    pub fn item(
        category: impl Into<String>,
        namespace: impl Into<String>,
        item: impl Into<String>,
    ) -> Self {
        ConfigPath {
            category: category.into(),
            namespace: namespace.into(),
            item: Some(item.into()),
        }
    }
}

impl Display for ConfigPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.item {
            Some(item) => write!(f, "{}/{}/{}", self.category, self.namespace, item),
            None => write!(f, "{}/{}", self.category, self.namespace),
        }
    }
}
