pub mod batch;
pub mod chunking;
pub mod error;
pub mod extractor;
pub mod fetch;
pub mod llm;
pub mod models;
pub mod naming;
pub mod pipeline;
pub mod prompts;
pub mod summarize;

pub use batch::{read_report_urls, BatchReport, BatchRunner};
pub use chunking::{chunk_words, clean_page_text};
pub use error::{AnalyzerError, LlmError};
pub use extractor::{LopdfExtractor, PageText, PdfExtractor};
pub use fetch::{HttpFetcher, ReportFetcher};
pub use llm::{ChatRequest, LlmClient, OpenAiChatClient, DEFAULT_API_BASE};
pub use models::{
    AnalyzerOptions, ChunkSummary, CombinedSummary, ReportResult, ReportSource, TextChunk,
};
pub use naming::{analysis_file_name, company_slug};
pub use pipeline::ReportPipeline;
pub use prompts::{PromptStore, CHUNK_ANALYSIS_PROMPT, SUMMARY_COMBINATION_PROMPT};
pub use summarize::{combine_summaries, summarize_chunk};
