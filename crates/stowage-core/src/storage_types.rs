use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage types a data source or a storage backend can have.
///
/// Defined in core because both the registry records and the binding logic
/// branch on it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageType {
    /// Served from a directory on the node identified by the peer address.
    #[default]
    Local,
    /// Proxied to a cloud object storage endpoint.
    ObjectGateway,
}

impl StorageType {
    /// Prefix used when generating backend names of this type.
    pub fn name_prefix(&self) -> &'static str {
        match self {
            StorageType::Local => "local",
            StorageType::ObjectGateway => "gateway",
        }
    }
}

impl FromStr for StorageType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "fs" => Ok(StorageType::Local),
            "object_gateway" | "gateway" | "s3" => Ok(StorageType::ObjectGateway),
            _ => Err(anyhow::anyhow!("Invalid storage type: {}", s)),
        }
    }
}

impl Display for StorageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageType::Local => write!(f, "LOCAL"),
            StorageType::ObjectGateway => write!(f, "OBJECT_GATEWAY"),
        }
    }
}
