//! Text extraction from uploaded resumes.
//!
//! Extraction never fails loudly: an unreadable document yields `None` and the
//! caller drops that candidate from the run.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::models::job::CandidateDocument;

/// Turns one document into plain text, or `None` when nothing can be read.
///
/// Carried in `AppState` as `Arc<dyn TextExtractor>`. Implementations are
/// synchronous and may be CPU heavy; callers run them on the blocking pool.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, document: &CandidateDocument) -> Option<String>;
}

/// PDF extractor backed by the pdf-extract crate.
/// Handles digital PDFs with embedded text layers; scanned images yield `None`.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, document: &CandidateDocument) -> Option<String> {
        // pdf-extract panics on some malformed inputs instead of returning Err.
        let pages = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&document.bytes)
        }));

        let pages = match pages {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => {
                warn!("Failed to read PDF {}: {e}", document.name);
                return None;
            }
            Err(_) => {
                warn!("PDF parser panicked on {}", document.name);
                return None;
            }
        };

        let text = join_pages(&pages);
        if text.trim().is_empty() {
            warn!("No extractable text in {}", document.name);
            return None;
        }

        debug!(
            "Extracted {} chars from {} page(s) of {}",
            text.len(),
            pages.len(),
            document.name
        );
        Some(text)
    }
}

/// Concatenates pages in order, each page with visible text followed by a newline.
fn join_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages.iter().filter(|p| !p.trim().is_empty()) {
        text.push_str(page);
        text.push('\n');
    }
    text
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Generate a valid PDF with one page per entry using lopdf
    /// (the library that pdf-extract uses internally).
    pub(crate) fn make_test_pdf(pages: &[&str]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
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
    fn test_extracts_text_from_digital_pdf() {
        let doc = CandidateDocument::new("cv.pdf", make_test_pdf(&["Python developer"]));
        let text = PdfTextExtractor.extract(&doc).expect("text expected");
        assert!(text.contains("Python"), "got: {text}");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_pages_are_joined_in_order() {
        let doc = CandidateDocument::new("cv.pdf", make_test_pdf(&["Firstpage", "Secondpage"]));
        let text = PdfTextExtractor.extract(&doc).expect("text expected");
        let first = text.find("Firstpage").expect("first page text");
        let second = text.find("Secondpage").expect("second page text");
        assert!(first < second);
    }

    #[test]
    fn test_repeated_extraction_is_identical() {
        let doc = CandidateDocument::new("cv.pdf", make_test_pdf(&["Kubernetes", "Docker"]));
        assert_eq!(PdfTextExtractor.extract(&doc), PdfTextExtractor.extract(&doc));
    }

    #[test]
    fn test_garbage_bytes_yield_none() {
        let doc = CandidateDocument::new("broken.pdf", b"not a pdf".to_vec());
        assert!(PdfTextExtractor.extract(&doc).is_none());
    }

    #[test]
    fn test_empty_upload_yields_none() {
        let doc = CandidateDocument::new("empty.pdf", Vec::new());
        assert!(PdfTextExtractor.extract(&doc).is_none());
    }

    #[test]
    fn test_join_pages_skips_empty_pages() {
        let pages = vec!["a".to_string(), String::new(), "b".to_string()];
        assert_eq!(join_pages(&pages), "a\nb\n");
    }

    #[test]
    fn test_whitespace_only_pdf_yields_none() {
        let doc = CandidateDocument::new("blank.pdf", make_test_pdf(&["   "]));
        assert!(PdfTextExtractor.extract(&doc).is_none());
    }

    #[test]
    fn test_join_pages_skips_whitespace_pages() {
        let pages = vec!["a".to_string(), "  \n\t".to_string(), "b".to_string()];
        assert_eq!(join_pages(&pages), "a\nb\n");
    }

    #[test]
    fn test_join_pages_of_nothing_is_empty() {
        assert_eq!(join_pages(&[]), "");
    }
}
