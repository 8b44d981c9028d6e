//! File type detection

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Text,
    Markdown,
    Pdf,
    Doc,
    Docx,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "pdf" => FileType::Pdf,
            "doc" => FileType::Doc,
            "docx" => FileType::Docx,
            _ => FileType::Unknown,
        }
    }

    /// Binary office/PDF formats; accepted for upload but never decoded
    pub fn is_binary_document(&self) -> bool {
        matches!(self, FileType::Pdf | FileType::Doc | FileType::Docx)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileType::Text => "plain text",
            FileType::Markdown => "markdown",
            FileType::Pdf => "PDF",
            FileType::Doc => "DOC",
            FileType::Docx => "DOCX",
            FileType::Unknown => "unknown",
        }
    }
}
