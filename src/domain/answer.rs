//! Question and answer types plus prompt assembly

use serde::Serialize;

use super::conversation::Channel;
use super::index::SearchHit;
use super::llm::{LlmRequest, LlmRequestBuilder};

/// Reply used when the context does not contain an answer
pub const FALLBACK_ANSWER: &str = "I could not find an answer.";

const INSTRUCTION: &str = "You are a customer support assistant. Answer the question using only \
the context below. If the context does not contain the answer, reply exactly with: ";

/// A question plus pass-through logging context
#[derive(Debug, Clone)]
pub struct AnswerRequest {
    pub question: String,
    pub channel: Channel,
    /// Opaque caller identity, only used for logging
    pub user_context: String,
}

impl AnswerRequest {
    pub fn new(question: impl Into<String>, channel: Channel, user_context: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            channel,
            user_context: user_context.into(),
        }
    }
}

/// Generated answer and the chunks it was conditioned on
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<SearchHit>,
}

/// Render retrieved chunks as the context block, one paragraph per chunk
pub fn render_context(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| format!("[{}]\n{}", hit.chunk.source, hit.chunk.content.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the chat request: instruction and context first, then the question
pub fn build_prompt(question: &str, hits: &[SearchHit]) -> LlmRequestBuilder {
    let system = format!(
        "{}\"{}\"\n\nContext:\n{}",
        INSTRUCTION,
        FALLBACK_ANSWER,
        render_context(hits)
    );

    LlmRequest::builder().system(system).user(question.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingestion::{Chunk, DocumentKind, SourceDocument};
    use crate::domain::llm::MessageRole;

    fn hit(source: &str, text: &str) -> SearchHit {
        let doc = SourceDocument::new(source, DocumentKind::Faq, text);
        SearchHit {
            chunk: Chunk::new(&doc, 0, 0, text.len(), text),
            score: 0.9,
        }
    }

    #[test]
    fn test_prompt_places_context_before_question() {
        let request = build_prompt(
            "  What are your hours? ",
            &[hit("FAQ.txt", "Q: What are your hours? A: 9-5.")],
        )
        .build();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);

        let system = request.first_of(MessageRole::System).unwrap();
        assert!(system.contains("Context:\n[FAQ.txt]\nQ: What are your hours? A: 9-5."));
        assert!(system.contains(FALLBACK_ANSWER));
        assert_eq!(request.first_of(MessageRole::User), Some("What are your hours?"));
    }

    #[test]
    fn test_prompt_with_empty_context() {
        let request = build_prompt("anything", &[]).build();
        let system = request.first_of(MessageRole::System).unwrap();

        assert!(system.ends_with("Context:\n"));
    }

    #[test]
    fn test_context_separates_chunks_with_blank_line() {
        let context = render_context(&[hit("a.txt", "one"), hit("b.txt", "two")]);

        assert_eq!(context, "[a.txt]\none\n\n[b.txt]\ntwo");
    }
}
