use crate::chunking::{chunk_words, clean_page_text};
use crate::error::{AnalyzerError, Result};
use crate::extractor::PdfExtractor;
use crate::fetch::ReportFetcher;
use crate::llm::LlmClient;
use crate::models::{AnalyzerOptions, ChunkSummary, ReportResult};
use crate::naming::analysis_file_name;
use crate::prompts::PromptStore;
use crate::summarize::{combine_summaries, summarize_chunk};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Runs the full analysis for one report URL: download, extract, chunk,
/// summarize, combine, persist. Any step failure is contained here and
/// surfaces only as `success = false` for that report.
pub struct ReportPipeline<F, E, L> {
    fetcher: F,
    extractor: E,
    llm: L,
    prompts: PromptStore,
    options: AnalyzerOptions,
}

impl<F, E, L> ReportPipeline<F, E, L>
where
    F: ReportFetcher + Send + Sync,
    E: PdfExtractor + Send + Sync,
    L: LlmClient + Send + Sync,
{
    pub fn new(
        fetcher: F,
        extractor: E,
        llm: L,
        prompts: PromptStore,
        options: AnalyzerOptions,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            llm,
            prompts,
            options,
        }
    }

    pub async fn run(&self, url: &str, output_dir: &Path, fallback_index: usize) -> ReportResult {
        info!(url, "starting report analysis");

        match self.run_inner(url, output_dir, fallback_index).await {
            Ok(output_path) => {
                info!(url, path = %output_path.display(), "analysis saved");
                ReportResult {
                    url: url.to_string(),
                    success: true,
                    output_path: Some(output_path),
                }
            }
            Err(error) => {
                warn!(url, %error, "report analysis failed");
                ReportResult {
                    url: url.to_string(),
                    success: false,
                    output_path: None,
                }
            }
        }
    }

    async fn run_inner(
        &self,
        url: &str,
        output_dir: &Path,
        fallback_index: usize,
    ) -> Result<PathBuf> {
        let bytes = self.fetcher.fetch(url).await?;

        // NamedTempFile deletes on drop, covering every exit path below.
        let mut temp = tempfile::Builder::new().suffix(".pdf").tempfile()?;
        temp.write_all(&bytes)?;
        temp.flush()?;

        let pages = self.extractor.extract_pages(temp.path())?;
        let text = pages
            .iter()
            .map(|page| clean_page_text(&page.text))
            .filter(|cleaned| !cleaned.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        if text.trim().is_empty() {
            return Err(AnalyzerError::Validation(
                "No text could be extracted from the PDF".to_string(),
            ));
        }

        let chunks = chunk_words(&text, self.options.words_per_chunk);
        if chunks.is_empty() {
            return Err(AnalyzerError::Validation(
                "No text chunks created".to_string(),
            ));
        }

        info!(url, chunk_count = chunks.len(), "summarizing chunks");

        let mut summaries: Vec<ChunkSummary> = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            summaries.push(summarize_chunk(&self.llm, &self.prompts, chunk).await);
        }

        let combined = combine_summaries(&self.llm, &self.prompts, &summaries).await;

        let file_name = analysis_file_name(url, fallback_index);
        std::fs::create_dir_all(output_dir)?;

        let output_path = output_dir.join(file_name);
        let mut body = String::new();
        body.push_str("Financial Report Analysis\n");
        body.push_str(&format!("Source: {url}\n"));
        body.push_str(&"=".repeat(80));
        body.push_str("\n\n");
        body.push_str(&combined.render());
        std::fs::write(&output_path, body)?;

        Ok(output_path)
    }
}
