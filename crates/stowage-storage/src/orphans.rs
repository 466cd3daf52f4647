//! Detection of backends no data source refers to.

use std::collections::HashSet;

use stowage_core::{Backends, DataSources};

/// Name of one backend that no data source is bound to.
///
/// Reports at most one candidate per call even when several backends are
/// unused; callers that clean up remove it and ask again.
pub fn find_unused_backend(backends: &Backends, sources: &DataSources) -> Option<String> {
    let used: HashSet<&str> = sources
        .values()
        .map(|source| source.objects_service_name.as_str())
        .collect();

    backends
        .keys()
        .find(|name| !used.contains(name.as_str()))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_core::{DataSource, StorageBackend};

    fn backends(names: &[&str]) -> Backends {
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

    fn sources(bindings: &[(&str, &str)]) -> DataSources {
        bindings
            .iter()
            .map(|(name, backend)| {
                let mut source = DataSource::local(*name, format!("/data/{}", name), "");
                source.objects_service_name = backend.to_string();
                (name.to_string(), source)
            })
            .collect()
    }

    #[test]
    fn reports_the_unreferenced_backend() {
        let found = find_unused_backend(
            &backends(&["A", "B", "C"]),
            &sources(&[("ds1", "A"), ("ds2", "C"), ("ds3", "C")]),
        );
        assert_eq!(found.as_deref(), Some("B"));
    }

    #[test]
    fn none_when_everything_is_used() {
        let found = find_unused_backend(
            &backends(&["A", "B"]),
            &sources(&[("ds1", "A"), ("ds2", "B")]),
        );
        assert_eq!(found, None);
        assert_eq!(
            find_unused_backend(&Backends::new(), &DataSources::new()),
            None
        );
    }

    #[test]
    fn reports_a_single_candidate() {
        let all = backends(&["A", "B", "C"]);
        let found = find_unused_backend(&all, &DataSources::new()).unwrap();
        assert!(all.contains_key(&found));
    }
}
