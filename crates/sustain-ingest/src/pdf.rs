//! PDF page source backed by lopdf

use crate::error::IngestError;
use lopdf::Document;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use sustain_domain::traits::PageSource;
use thiserror::Error;
use tracing::debug;

/// Failure to extract the text of a single page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// Page number outside `1..=page_count`
    #[error("Page {page} is out of range (document has {count} pages)")]
    OutOfRange {
        /// Requested page
        page: u32,
        /// Pages in the document
        count: u32,
    },

    /// The PDF library reported an error
    #[error("Text extraction failed on page {page}: {message}")]
    Extraction {
        /// Requested page
        page: u32,
        /// Library error message
        message: String,
    },

    /// The PDF library panicked on malformed page content
    #[error("Text extraction aborted on page {page}")]
    Panicked {
        /// Requested page
        page: u32,
    },
}

/// A loaded PDF document
pub struct PdfDocument {
    doc: Document,
    page_count: u32,
}

impl PdfDocument {
    /// Open a PDF file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let doc = Document::load(path).map_err(|e| {
            IngestError::Document(format!("Failed to open {}: {}", path.display(), e))
        })?;
        Ok(Self::from_document(doc))
    }

    /// Load a PDF from memory
    pub fn from_bytes(data: &[u8]) -> Result<Self, IngestError> {
        let doc = Document::load_mem(data)
            .map_err(|e| IngestError::Document(format!("Failed to load PDF: {}", e)))?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: Document) -> Self {
        let page_count = u32::try_from(doc.get_pages().len()).unwrap_or(u32::MAX);
        debug!(page_count, "PDF loaded");
        Self { doc, page_count }
    }
}

impl PageSource for PdfDocument {
    type Error = PageError;

    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_text(&self, page_number: u32) -> Result<String, Self::Error> {
        if page_number == 0 || page_number > self.page_count {
            return Err(PageError::OutOfRange {
                page: page_number,
                count: self.page_count,
            });
        }

        // Malformed content streams can panic inside the decoder
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.doc.extract_text(&[page_number])
        }));

        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(PageError::Extraction {
                page: page_number,
                message: e.to_string(),
            }),
            Err(_) => Err(PageError::Panicked { page: page_number }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a PDF with one text line per page
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_pages_in_document_order() {
        let pdf = PdfDocument::from_bytes(&build_pdf(&["Cocoa sourcing", "Palm oil traceability"]))
            .unwrap();

        assert_eq!(pdf.page_count(), 2);
        assert!(pdf.page_text(1).unwrap().contains("Cocoa"));
        assert!(pdf.page_text(2).unwrap().contains("Palm"));
    }

    #[test]
    fn test_out_of_range_pages() {
        let pdf = PdfDocument::from_bytes(&build_pdf(&["Only page"])).unwrap();

        assert_eq!(
            pdf.page_text(0),
            Err(PageError::OutOfRange { page: 0, count: 1 })
        );
        assert!(matches!(pdf.page_text(2), Err(PageError::OutOfRange { .. })));
    }

    #[test]
    fn test_garbage_bytes_are_a_document_error() {
        let result = PdfDocument::from_bytes(b"this is not a pdf");
        assert!(matches!(result, Err(IngestError::Document(_))));
    }

    #[test]
    fn test_missing_file_is_a_document_error() {
        let result = PdfDocument::open("/nonexistent/report.pdf");
        match result {
            Err(IngestError::Document(message)) => assert!(message.contains("report.pdf")),
            Err(other) => panic!("Expected Document error, got {:?}", other),
            Ok(_) => panic!("Expected Document error"),
        }
    }

    #[test]
    fn test_open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, build_pdf(&["a", "b", "c"])).unwrap();

        let pdf = PdfDocument::open(&path).unwrap();
        assert_eq!(pdf.page_count(), 3);
    }
}
