use serde::{Deserialize, Serialize};

/// Create request as it arrives from the outer surface: ids are hex
/// strings and status is an untrusted token, both validated by the handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostCommand {
    pub title: String,
    pub description: String,
    pub photo: String,
    pub author: String,
    pub categories: Vec<String>,
    pub status: String,
}
