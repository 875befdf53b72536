use crate::llm::{ChatRequest, LlmClient};
use crate::models::{ChunkSummary, CombinedSummary, TextChunk};
use crate::prompts::PromptStore;
use tracing::{debug, warn};

const CHUNK_SYSTEM_ROLE: &str =
    "You are a financial analyst expert at summarizing business reports.";
const COMBINE_SYSTEM_ROLE: &str =
    "You are a senior financial analyst creating executive summaries.";

const CHUNK_TEMPERATURE: f32 = 0.3;
const CHUNK_MAX_TOKENS: usize = 1_000;
const COMBINE_TEMPERATURE: f32 = 0.2;
const COMBINE_MAX_TOKENS: usize = 2_000;

/// Summarizes one chunk. A failed call degrades the chunk to an error
/// marker so the report can still finish with partial content.
pub async fn summarize_chunk<L: LlmClient>(
    llm: &L,
    prompts: &PromptStore,
    chunk: &TextChunk,
) -> ChunkSummary {
    debug!(chunk = chunk.number, total = chunk.total, "analyzing chunk");

    let request = ChatRequest {
        system: CHUNK_SYSTEM_ROLE.to_string(),
        user: prompts.chunk_analysis(&chunk.text, chunk.number, chunk.total),
        temperature: CHUNK_TEMPERATURE,
        max_tokens: CHUNK_MAX_TOKENS,
    };

    match llm.complete(&request).await {
        Ok(summary) => ChunkSummary::Summarized(summary),
        Err(error) => {
            warn!(chunk = chunk.number, %error, "chunk analysis failed, degrading");
            ChunkSummary::Degraded {
                chunk_number: chunk.number,
                detail: error.to_string(),
            }
        }
    }
}

/// Joins the chunk summaries with blank lines and asks for one cohesive
/// executive summary. Order of the input slice is the chunk order.
pub async fn combine_summaries<L: LlmClient>(
    llm: &L,
    prompts: &PromptStore,
    summaries: &[ChunkSummary],
) -> CombinedSummary {
    let combined_text = summaries
        .iter()
        .map(ChunkSummary::render)
        .collect::<Vec<_>>()
        .join("\n\n");

    let request = ChatRequest {
        system: COMBINE_SYSTEM_ROLE.to_string(),
        user: prompts.summary_combination(&combined_text),
        temperature: COMBINE_TEMPERATURE,
        max_tokens: COMBINE_MAX_TOKENS,
    };

    match llm.complete(&request).await {
        Ok(summary) => CombinedSummary::Summarized(summary),
        Err(error) => {
            warn!(%error, "final summary generation failed, degrading");
            CombinedSummary::Degraded {
                detail: error.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use async_trait::async_trait;

    struct EchoLlm;

    struct FailingLlm;

    #[async_trait]
    impl LlmClient for EchoLlm {
        async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
            Ok(format!("echo: {}", request.user))
        }
    }

    #[async_trait]
    impl LlmClient for FailingLlm {
        async fn complete(&self, _request: &ChatRequest) -> Result<String, LlmError> {
            Err(LlmError::EmptyResponse)
        }
    }

    fn store() -> PromptStore {
        PromptStore::parse(
            "[CHUNK_ANALYSIS_PROMPT]{chunk_number}/{total_chunks} {chunk}\
             [SUMMARY_COMBINATION_PROMPT]final: {combined_text}",
        )
    }

    fn chunk(text: &str, number: usize, total: usize) -> TextChunk {
        TextChunk {
            text: text.to_string(),
            number,
            total,
        }
    }

    #[tokio::test]
    async fn chunk_summary_carries_filled_prompt() {
        let summary = summarize_chunk(&EchoLlm, &store(), &chunk("sales up", 2, 3)).await;
        assert_eq!(summary, ChunkSummary::Summarized("echo: 2/3 sales up".to_string()));
    }

    #[tokio::test]
    async fn failed_chunk_call_degrades_instead_of_erroring() {
        let summary = summarize_chunk(&FailingLlm, &store(), &chunk("sales up", 1, 1)).await;
        assert!(summary.is_degraded());
        assert!(summary.render().starts_with("Error analyzing chunk 1:"));
    }

    #[tokio::test]
    async fn combine_joins_summaries_with_blank_lines_in_order() {
        let summaries = vec![
            ChunkSummary::Summarized("first".to_string()),
            ChunkSummary::Summarized("second".to_string()),
        ];
        let combined = combine_summaries(&EchoLlm, &store(), &summaries).await;
        assert_eq!(
            combined,
            CombinedSummary::Summarized("echo: final: first\n\nsecond".to_string())
        );
    }

    #[tokio::test]
    async fn degraded_chunks_feed_their_markers_into_combination() {
        let summaries = vec![ChunkSummary::Degraded {
            chunk_number: 1,
            detail: "boom".to_string(),
        }];
        let combined = combine_summaries(&EchoLlm, &store(), &summaries).await;
        assert_eq!(
            combined,
            CombinedSummary::Summarized(
                "echo: final: Error analyzing chunk 1: boom".to_string()
            )
        );
    }

    #[tokio::test]
    async fn failed_combination_degrades_instead_of_erroring() {
        let summaries = vec![ChunkSummary::Summarized("only".to_string())];
        let combined = combine_summaries(&FailingLlm, &store(), &summaries).await;
        assert!(combined.render().starts_with("Error generating final summary:"));
    }
}
