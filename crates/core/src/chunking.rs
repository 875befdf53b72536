use crate::models::TextChunk;
use regex::Regex;
use std::sync::OnceLock;

fn page_number_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\d+[ \t]*\n").expect("static pattern compiles"))
}

/// Cleans one page of raw extracted text. Page-number lines are stripped
/// while newlines still exist, then every remaining whitespace run
/// collapses to a single space. Empty input stays empty.
pub fn clean_page_text(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let depaginated = page_number_line().replace_all(raw, "\n");
    depaginated
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Greedily groups the text's words into chunks of exactly `max_words`
/// words, the final chunk holding the remainder. Empty text yields an
/// empty sequence; the caller decides whether that is an error.
pub fn chunk_words(text: &str, max_words: usize) -> Vec<TextChunk> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let bodies: Vec<String> = words
        .chunks(max_words)
        .map(|group| group.join(" "))
        .collect();

    let total = bodies.len();
    bodies
        .into_iter()
        .enumerate()
        .map(|(index, text)| TextChunk {
            text,
            number: index + 1,
            total,
        })
        .collect()
}
