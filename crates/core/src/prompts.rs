use crate::error::{AnalyzerError, Result};
use std::collections::HashMap;
use std::path::Path;

pub const CHUNK_ANALYSIS_PROMPT: &str = "CHUNK_ANALYSIS_PROMPT";
pub const SUMMARY_COMBINATION_PROMPT: &str = "SUMMARY_COMBINATION_PROMPT";

const REQUIRED_PROMPTS: [&str; 2] = [CHUNK_ANALYSIS_PROMPT, SUMMARY_COMBINATION_PROMPT];

/// Named prompt templates loaded once at startup. Immutable after load;
/// extra sections beyond the required two are kept but unused.
#[derive(Debug, Clone)]
pub struct PromptStore {
    templates: HashMap<String, String>,
}

impl PromptStore {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|error| {
            AnalyzerError::Config(format!(
                "prompt file {} could not be read: {error}",
                path.display()
            ))
        })?;

        let store = Self::parse(&content);
        store.validate()?;
        Ok(store)
    }

    /// Sections are introduced by a bracketed `[NAME]` token and run until
    /// the next one. Text before the first bracket is ignored, a section
    /// that never closes its bracket is discarded, and a duplicated name
    /// keeps the last body seen.
    pub fn parse(content: &str) -> Self {
        let mut templates = HashMap::new();

        for section in content.split('[').skip(1) {
            let Some((name, body)) = section.split_once(']') else {
                continue;
            };
            templates.insert(name.trim().to_string(), body.trim().to_string());
        }

        Self { templates }
    }

    fn validate(&self) -> Result<()> {
        for required in REQUIRED_PROMPTS {
            match self.templates.get(required) {
                Some(body) if !body.is_empty() => {}
                _ => {
                    return Err(AnalyzerError::Config(format!(
                        "required prompt section [{required}] is missing or empty"
                    )))
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// `{chunk}` is substituted last so placeholder-shaped text inside the
    /// document itself is never expanded.
    pub fn chunk_analysis(&self, chunk_text: &str, chunk_number: usize, total_chunks: usize) -> String {
        self.templates
            .get(CHUNK_ANALYSIS_PROMPT)
            .map(String::as_str)
            .unwrap_or_default()
            .replace("{chunk_number}", &chunk_number.to_string())
            .replace("{total_chunks}", &total_chunks.to_string())
            .replace("{chunk}", chunk_text)
    }

    pub fn summary_combination(&self, combined_text: &str) -> String {
        self.templates
            .get(SUMMARY_COMBINATION_PROMPT)
            .map(String::as_str)
            .unwrap_or_default()
            .replace("{combined_text}", combined_text)
    }
}
