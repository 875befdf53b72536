use crate::error::AnalyzerError;
use lopdf::Document;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// External text-extraction collaborator. Implementations return the
/// document's pages in order; a page with no extractable text comes back
/// as an empty string rather than being dropped.
pub trait PdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, AnalyzerError>;
}

#[derive(Default)]
pub struct LopdfExtractor;

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, AnalyzerError> {
        let document = Document::load(path).map_err(|error| AnalyzerError::Extraction {
            path: path.to_path_buf(),
            details: error.to_string(),
        })?;

        let mut pages = Vec::new();
        for (page_no, _page_id) in document.get_pages() {
            let text = document
                .extract_text(&[page_no])
                .map_err(|error| AnalyzerError::Extraction {
                    path: path.to_path_buf(),
                    details: format!("page {page_no}: {error}"),
                })?;

            pages.push(PageText {
                number: page_no,
                text,
            });
        }

        Ok(pages)
    }
}
