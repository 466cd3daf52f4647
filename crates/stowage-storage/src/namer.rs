//! Names for newly created backends.

use stowage_core::{Backends, StorageType};

/// First free `local<N>` / `gateway<N>` name, with N starting at 1.
///
/// Unique only against `existing`: a backend created concurrently from
/// another snapshot can receive the same name.
pub fn next_backend_name(existing: &Backends, storage_type: StorageType) -> String {
    let prefix = storage_type.name_prefix();
    let mut index = 1;
    loop {
        let label = format!("{}{}", prefix, index);
        if !existing.contains_key(&label) {
            return label;
        }
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_core::StorageBackend;

    fn with_names(names: &[&str]) -> Backends {
        names
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    StorageBackend {
                        name: name.to_string(),
                        ..Default::default()
                    },
                )
            })
            .collect()
    }

    #[test]
    fn starts_at_one() {
        let existing = Backends::new();
        assert_eq!(next_backend_name(&existing, StorageType::Local), "local1");
        assert_eq!(
            next_backend_name(&existing, StorageType::ObjectGateway),
            "gateway1"
        );
    }

    #[test]
    fn fills_the_first_gap() {
        let existing = with_names(&["local1", "local3", "gateway1"]);
        assert_eq!(next_backend_name(&existing, StorageType::Local), "local2");
        assert_eq!(
            next_backend_name(&existing, StorageType::ObjectGateway),
            "gateway2"
        );
    }
}
