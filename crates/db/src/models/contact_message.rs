//! Contact form submission record (collection `contactmessage`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub company: Option<String>,
    /// Reason for reaching out.
    #[serde(default)]
    pub topic: Option<String>,
}
