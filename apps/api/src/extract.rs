//! Text Extractor — converts an uploaded binary document (PDF, DOCX, or
//! plain text) into UTF-8 text.
//!
//! Type and size validation are separate pure predicates so the upload
//! handler can check them before any decode attempt. Emptiness of the
//! extracted text is a caller concern, not an extractor concern.

use crate::errors::AppError;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TXT: &str = "text/plain";

/// Upload size bound. Exactly 10 MiB passes.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Returns true for the three supported document MIME types.
pub fn validate_file_type(mime_type: &str) -> bool {
    matches!(mime_type, MIME_PDF | MIME_DOCX | MIME_TXT)
}

/// Returns true when the byte size is within the upload bound.
pub fn validate_file_size(size: usize) -> bool {
    size <= MAX_FILE_SIZE
}

/// Extracts UTF-8 text from a document buffer according to its declared
/// MIME type. Unsupported types fail before any parsing attempt.
pub fn extract_text(bytes: &[u8], mime_type: &str) -> Result<String, AppError> {
    match mime_type {
        MIME_PDF => extract_pdf_text(bytes),
        MIME_DOCX => extract_docx_text(bytes),
        // Tolerant decode: invalid sequences become replacement characters
        // rather than failing the upload.
        MIME_TXT => Ok(String::from_utf8_lossy(bytes).into_owned()),
        _ => Err(AppError::UnsupportedType),
    }
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::MalformedDocument(format!("Failed to parse PDF: {e}")))
}

fn extract_docx_text(bytes: &[u8]) -> Result<String, AppError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| AppError::MalformedDocument(format!("Failed to parse DOCX: {e}")))?;

    let mut text = String::new();
    for child in docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(paragraph) => {
                append_paragraph_text(&mut text, &paragraph);
            }
            docx_rs::DocumentChild::Table(table) => {
                append_table_text(&mut text, &table);
            }
            _ => {}
        }
    }
    Ok(text)
}

fn append_paragraph_text(text: &mut String, paragraph: &docx_rs::Paragraph) {
    for child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text.push('\n');
}

// Resumes are often laid out as a table; cell paragraphs count as document
// text the same as body paragraphs.
fn append_table_text(text: &mut String, table: &docx_rs::Table) {
    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;
            for content in &cell.children {
                match content {
                    docx_rs::TableCellContent::Paragraph(paragraph) => {
                        append_paragraph_text(text, paragraph);
                    }
                    docx_rs::TableCellContent::Table(nested) => append_table_text(text, nested),
                    _ => {}
                }
            }
        }
    }
}
