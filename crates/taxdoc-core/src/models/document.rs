use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Category assigned to a stored document when it is attached to an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Invoice,
    Receipt,
    Prescription,
    BankStatement,
    Other,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentType::Invoice => "invoice",
            DocumentType::Receipt => "receipt",
            DocumentType::Prescription => "prescription",
            DocumentType::BankStatement => "bank_statement",
            DocumentType::Other => "other",
        };
        f.write_str(label)
    }
}

/// A document record held by the remote store, consumed read-only.
///
/// `relative_path` encodes the logical directory and filename on the remote
/// store, with `/` separators (e.g. `2024/invoice.pdf`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub relative_path: String,
    pub document_type: DocumentType,
}

impl Document {
    pub fn new(id: Uuid, relative_path: impl Into<String>, document_type: DocumentType) -> Self {
        Document {
            id,
            relative_path: relative_path.into(),
            document_type,
        }
    }

    /// Filename component of the relative path. This is the name the local
    /// cache entry is stored under.
    pub fn filename(&self) -> &str {
        self.relative_path
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.relative_path)
    }

    /// Logical directory on the remote store; empty string when the document
    /// sits at the share root.
    pub fn parent_path(&self) -> &str {
        self.relative_path
            .rsplit_once('/')
            .map(|(parent, _)| parent)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_and_parent_split() {
        let doc = Document::new(Uuid::new_v4(), "2024/invoice.pdf", DocumentType::Invoice);
        assert_eq!(doc.filename(), "invoice.pdf");
        assert_eq!(doc.parent_path(), "2024");
    }

    #[test]
    fn nested_parent_path_is_preserved() {
        let doc = Document::new(
            Uuid::new_v4(),
            "2024/march/receipt.pdf",
            DocumentType::Receipt,
        );
        assert_eq!(doc.filename(), "receipt.pdf");
        assert_eq!(doc.parent_path(), "2024/march");
    }

    #[test]
    fn root_level_document_has_empty_parent() {
        let doc = Document::new(Uuid::new_v4(), "statement.pdf", DocumentType::BankStatement);
        assert_eq!(doc.filename(), "statement.pdf");
        assert_eq!(doc.parent_path(), "");
    }

    #[test]
    fn document_type_serializes_snake_case() {
        let json = serde_json::to_string(&DocumentType::BankStatement).unwrap();
        assert_eq!(json, "\"bank_statement\"");

        let parsed: DocumentType = serde_json::from_str("\"invoice\"").unwrap();
        assert_eq!(parsed, DocumentType::Invoice);
    }
}
