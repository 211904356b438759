use serde::{Deserialize, Serialize};

/// Tool that can be used by the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Tool {
    /// File search over previously indexed stores
    FileSearch {
        /// The file search configuration
        file_search: FileSearchConfig,
    },
}

/// Configuration for the file search tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileSearchConfig {
    /// Resource names of the stores to consult
    pub file_search_store_names: Vec<String>,
}

impl Tool {
    /// Create a new file search tool over the given stores
    pub fn file_search(store_names: Vec<String>) -> Self {
        Self::FileSearch {
            file_search: FileSearchConfig {
                file_search_store_names: store_names,
            },
        }
    }
}
