use crate::error::Result;
use crate::model::{Block, Document};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Everything nestnote persists: the document collection, the flat block
/// collection, and the set of expanded documents in the navigation tree.
///
/// The current selection is not part of it; it is session state.
///
/// On disk:
///
/// ```text
/// {
///   "documents": [ { "id": ..., "parentDocumentId": ..., "childDocumentIds": [...] } ],
///   "blocks": [ { "id": ..., "pageId": ..., "type": "paragraph", "order": 0 } ],
///   "expandedDocuments": [ "<uuid>", ... ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub expanded_documents: HashSet<Uuid>,
}

impl Snapshot {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.blocks.is_empty() && self.expanded_documents.is_empty()
    }
}
