use crate::error::{AnalyzerError, Result};
use crate::extractor::PdfExtractor;
use crate::fetch::ReportFetcher;
use crate::llm::LlmClient;
use crate::models::{ReportResult, ReportSource};
use crate::pipeline::ReportPipeline;
use std::path::Path;
use tracing::{info, warn};

/// Ordered per-URL outcomes for one batch run, in URL-file order.
#[derive(Debug)]
pub struct BatchReport {
    pub results: Vec<ReportResult>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|result| result.success).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// Reads the URL list: blank lines and `#` comments are skipped, lines not
/// starting with `http` are warned about and skipped. Positions are
/// 1-based over the accepted URLs, for fallback file naming.
pub fn read_report_urls(path: &Path) -> Result<Vec<ReportSource>> {
    let content = std::fs::read_to_string(path).map_err(|error| {
        AnalyzerError::Config(format!(
            "url file {} could not be read: {error}",
            path.display()
        ))
    })?;

    let mut sources = Vec::new();
    for (line_number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !line.starts_with("http") {
            warn!(
                line = line_number + 1,
                content = line,
                "skipping line that does not look like a URL"
            );
            continue;
        }
        sources.push(ReportSource {
            url: line.to_string(),
            position: sources.len() + 1,
        });
    }

    if sources.is_empty() {
        return Err(AnalyzerError::Config(format!(
            "no valid URLs found in {}",
            path.display()
        )));
    }

    Ok(sources)
}

pub struct BatchRunner<F, E, L> {
    pipeline: ReportPipeline<F, E, L>,
}

impl<F, E, L> BatchRunner<F, E, L>
where
    F: ReportFetcher + Send + Sync,
    E: PdfExtractor + Send + Sync,
    L: LlmClient + Send + Sync,
{
    pub fn new(pipeline: ReportPipeline<F, E, L>) -> Self {
        Self { pipeline }
    }

    /// Processes every URL strictly in file order, one report at a time.
    /// A failed report never stops the batch.
    pub async fn run_all(&self, url_file: &Path, output_dir: &Path) -> Result<BatchReport> {
        let sources = read_report_urls(url_file)?;
        let total = sources.len();
        info!(total, output_dir = %output_dir.display(), "starting batch analysis");

        let mut results = Vec::with_capacity(total);
        for source in sources {
            info!(position = source.position, total, url = %source.url, "processing report");
            let result = self
                .pipeline
                .run(&source.url, output_dir, source.position)
                .await;
            results.push(result);
        }

        let report = BatchReport { results };
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch analysis finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::extractor::PageText;
    use crate::llm::ChatRequest;
    use crate::models::AnalyzerOptions;
    use crate::prompts::PromptStore;
    use async_trait::async_trait;
    use tempfile::tempdir;

    #[test]
    fn url_file_parsing_skips_comments_blanks_and_junk() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("urls.txt");
        std::fs::write(
            &path,
            "# quarterly reports\n\nhttps://a.example/1.pdf\nftp://nope\nhttps://b.example/2.pdf\n",
        )
        .expect("write");

        let sources = read_report_urls(&path).expect("valid urls");
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].url, "https://a.example/1.pdf");
        assert_eq!(sources[0].position, 1);
        assert_eq!(sources[1].url, "https://b.example/2.pdf");
        assert_eq!(sources[1].position, 2);
    }

    #[test]
    fn url_file_with_no_valid_urls_is_a_config_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "# only comments\nnot-a-url\n").expect("write");

        let result = read_report_urls(&path);
        assert!(matches!(result, Err(AnalyzerError::Config(_))));
    }

    #[test]
    fn missing_url_file_is_a_config_error() {
        let result = read_report_urls(Path::new("/nonexistent/urls.txt"));
        assert!(matches!(result, Err(AnalyzerError::Config(_))));
    }

    struct SelectiveFetcher;

    #[async_trait]
    impl ReportFetcher for SelectiveFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, AnalyzerError> {
            if url.contains("broken") {
                Err(AnalyzerError::HttpStatus {
                    url: url.to_string(),
                    status: 500,
                })
            } else {
                Ok(b"%PDF-1.4 fake".to_vec())
            }
        }
    }

    struct CannedExtractor;

    impl PdfExtractor for CannedExtractor {
        fn extract_pages(&self, _path: &Path) -> Result<Vec<PageText>, AnalyzerError> {
            Ok(vec![PageText {
                number: 1,
                text: "some report text to summarize".to_string(),
            }])
        }
    }

    struct EchoLlm;

    #[async_trait]
    impl LlmClient for EchoLlm {
        async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
            Ok(format!("summary: {}", request.user))
        }
    }

    fn prompts() -> PromptStore {
        PromptStore::parse(
            "[CHUNK_ANALYSIS_PROMPT]{chunk}[SUMMARY_COMBINATION_PROMPT]{combined_text}",
        )
    }

    #[tokio::test]
    async fn middle_failure_does_not_stop_the_batch() {
        let dir = tempdir().expect("tempdir");
        let url_file = dir.path().join("urls.txt");
        std::fs::write(
            &url_file,
            "https://one.example/a.pdf\nhttps://broken.example/b.pdf\nhttps://three.example/c.pdf\n",
        )
        .expect("write");
        let output_dir = dir.path().join("out");

        let runner = BatchRunner::new(ReportPipeline::new(
            SelectiveFetcher,
            CannedExtractor,
            EchoLlm,
            prompts(),
            AnalyzerOptions::default(),
        ));

        let report = runner
            .run_all(&url_file, &output_dir)
            .await
            .expect("batch runs");

        assert_eq!(report.results.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);

        assert_eq!(report.results[0].url, "https://one.example/a.pdf");
        assert!(report.results[0].success);
        assert!(!report.results[1].success);
        assert!(report.results[2].success);

        assert!(output_dir.join("one_analysis.txt").exists());
        assert!(!output_dir.join("broken_analysis.txt").exists());
        assert!(output_dir.join("three_analysis.txt").exists());
    }
}
