use std::path::PathBuf;

/// One word-bounded slice of a report's cleaned text. Indices are 1-based
/// because the chunk-analysis prompt interpolates them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub text: String,
    pub number: usize,
    pub total: usize,
}

/// Outcome of summarizing one chunk. A failed LLM call degrades the chunk
/// instead of failing the report, so downstream code can tell a real
/// summary from a placeholder without string-matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkSummary {
    Summarized(String),
    Degraded { chunk_number: usize, detail: String },
}

impl ChunkSummary {
    pub fn render(&self) -> String {
        match self {
            ChunkSummary::Summarized(text) => text.clone(),
            ChunkSummary::Degraded {
                chunk_number,
                detail,
            } => format!("Error analyzing chunk {chunk_number}: {detail}"),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ChunkSummary::Degraded { .. })
    }
}

/// Final executive summary for one report, with the same degradation
/// semantics as [`ChunkSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombinedSummary {
    Summarized(String),
    Degraded { detail: String },
}

impl CombinedSummary {
    pub fn render(&self) -> String {
        match self {
            CombinedSummary::Summarized(text) => text.clone(),
            CombinedSummary::Degraded { detail } => {
                format!("Error generating final summary: {detail}")
            }
        }
    }
}

/// One input URL together with its 1-based position in the URL file. The
/// position doubles as the filename fallback when no company slug can be
/// derived from the URL.
#[derive(Debug, Clone)]
pub struct ReportSource {
    pub url: String,
    pub position: usize,
}

#[derive(Debug, Clone)]
pub struct ReportResult {
    pub url: String,
    pub success: bool,
    pub output_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    pub model: String,
    pub words_per_chunk: usize,
    pub download_timeout_secs: u64,
    pub user_agent: &'static str,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            words_per_chunk: 2_500,
            download_timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
        }
    }
}

impl AnalyzerOptions {
    /// Chunk size zero would make the chunker loop forever on any
    /// non-empty document, so it is rejected at configuration time.
    pub fn validate(&self) -> Result<(), crate::AnalyzerError> {
        if self.words_per_chunk == 0 {
            return Err(crate::AnalyzerError::Config(
                "words_per_chunk must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}
