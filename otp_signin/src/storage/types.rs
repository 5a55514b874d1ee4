use serde::{Deserialize, Serialize};

/// Data stored in the cache
///
/// Values are JSON strings produced by the owning module (pending sign-in
/// state, challenge transcripts, browser sessions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheData {
    pub value: String,
}
