//! Index table names derived from a data source name.

use crate::constants::MAX_TABLE_NAME_STEM;

/// The three tables the index service keeps per data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTableNames {
    pub commits: String,
    pub nodes: String,
    pub tree: String,
}

/// Derive the index table names for `data_source_name`.
///
/// Hyphens become underscores and the result is cut to its first
/// [`MAX_TABLE_NAME_STEM`] characters, so the same name always yields the
/// same tables and long names stay within database identifier limits.
pub fn index_table_names(data_source_name: &str) -> IndexTableNames {
    let stem: String = data_source_name
        .chars()
        .map(|c| if c == '-' { '_' } else { c })
        .take(MAX_TABLE_NAME_STEM)
        .collect();

    IndexTableNames {
        commits: format!("data_{}_commits", stem),
        nodes: format!("data_{}_nodes", stem),
        tree: format!("data_{}_tree", stem),
    }
}
