//! Document - Stored text record that can carry an embedding
//!
//! Documents are owned by the external store. The core only reads them
//! and writes the embedding back.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::EmbeddingVector;

/// Store-assigned document key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Document - A text record in a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<EmbeddingVector>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: Option<String>) -> Self {
        Self {
            id: DocumentId::new(id),
            text,
            embedding: None,
        }
    }

    /// Text to embed; absent text embeds as the empty string
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
