#[cfg(test)]
#[path = "export_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;

pub const EXPORT_FILE_NAME: &str = "agrisMart_response.md";
pub const EXPORT_MIME_TYPE: &str = "text/markdown";

/// A rendered markdown document ready to be saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub mime_type: String,
    pub body: String,
}

impl ExportDocument {
    pub fn new(body: String) -> ExportDocument {
        return ExportDocument {
            file_name: EXPORT_FILE_NAME.to_string(),
            mime_type: EXPORT_MIME_TYPE.to_string(),
            body,
        };
    }
}

pub fn export_document(
    question: &str,
    answer: &str,
    topic_label: &str,
    checklist: Option<&[String]>,
) -> String {
    return export_document_at(question, answer, topic_label, checklist, Local::now());
}

/// Checklist items are always written unchecked, whatever their state in the
/// session.
pub fn export_document_at(
    question: &str,
    answer: &str,
    topic_label: &str,
    checklist: Option<&[String]>,
    generated: DateTime<Local>,
) -> String {
    let mut doc = "# AgriSmart Farming Advice\n\n".to_string();
    doc += &format!("### Topic: {topic_label}\n");
    doc += &format!("### Question:\n{question}\n\n");
    doc += &format!("### Answer:\n{answer}\n\n");

    if let Some(items) = checklist.filter(|items| return !items.is_empty()) {
        doc += "### Checklist:\n";
        for item in items {
            doc += &format!("- [ ] {item}\n");
        }
    }

    doc += &format!(
        "\nGenerated on {}",
        generated.format("%Y-%m-%d %H:%M:%S%.6f")
    );

    return doc;
}
