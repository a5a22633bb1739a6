//! Fatal error channel for the admin cache layer.
//!
//! Variants here describe programmer or data-setup mistakes (corrupt code files, cyclic group
//! trees, missing configuration). They are meant to be propagated to the caller's boundary with
//! `?`, never recovered locally. Expected "not found" outcomes travel through
//! [`crate::lookup::Lookup`] instead.

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("依據條件 item type.parent code.item code: {item_type}.{parent_code}.{item_code} 無法找到對應的代碼，或者超過一個以上的代碼")]
    DuplicateItemCode {
        item_type: String,
        parent_code: String,
        item_code: String,
    },
    #[error("code cache entry {key} holds {count} codes, expected exactly one")]
    AmbiguousCode { key: String, count: usize },

    #[error("group {0} does not exist")]
    UnknownGroup(String),
    #[error("group hierarchy contains a cycle: {}", path.join(" -> "))]
    GroupCycle { path: Vec<String> },
    #[error("group level thresholds are not configured")]
    GroupLevelThresholdsNotConfigured,

    #[error("failed to decrypt database credentials for clinic {clinic}: {source}")]
    Decrypt {
        clinic: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("repository read failed: {0}")]
    Repository(String),
    #[error("failed to read seed file: {0}")]
    SeedRead(std::io::Error),
    #[error("failed to deserialize YAML: {0}")]
    YamlDeserialization(serde_yaml::Error),
}

pub type AdminResult<T> = std::result::Result<T, AdminError>;
