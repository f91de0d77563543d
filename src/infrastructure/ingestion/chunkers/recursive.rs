//! Recursive character chunking strategy

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::ingestion::{Chunk, ChunkingConfig, ChunkingStrategy, SourceDocument};
use crate::domain::DomainError;

/// Chunking strategy that ends each chunk on the coarsest natural boundary
/// available within its window.
///
/// Boundary preference: paragraphs -> lines -> sentences -> words -> hard cut.
/// Consecutive chunks always share exactly `chunk_overlap` characters, and
/// lengths are counted in chars so multi-byte text is never split mid-character.
#[derive(Debug, Clone, Default)]
pub struct RecursiveChunker;

/// Candidate chunk end positions (char offsets, ascending) per boundary level
struct Breakpoints {
    levels: [Vec<usize>; 4],
}

impl Breakpoints {
    fn new(text: &str, offsets: &[usize]) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut paragraphs = Vec::new();
        let mut lines = Vec::new();
        let mut words = Vec::new();

        for pos in 1..chars.len() {
            let prev = chars[pos - 1];

            if prev == '\n' {
                lines.push(pos);
                if pos >= 2 && chars[pos - 2] == '\n' {
                    paragraphs.push(pos);
                }
            }

            if prev.is_whitespace() && !chars[pos].is_whitespace() {
                words.push(pos);
            }
        }

        let sentences = text
            .split_sentence_bound_indices()
            .filter(|(byte, _)| *byte > 0)
            .filter_map(|(byte, _)| offsets.binary_search(&byte).ok())
            .collect();

        Self {
            levels: [paragraphs, lines, sentences, words],
        }
    }

    /// Largest breakpoint in `[lo, hi]` at the most preferred level that has one
    fn best(&self, lo: usize, hi: usize) -> Option<usize> {
        self.levels.iter().find_map(|positions| {
            let idx = positions.partition_point(|&p| p <= hi);
            positions[..idx].last().copied().filter(|&p| p >= lo)
        })
    }
}

impl RecursiveChunker {
    pub fn new() -> Self {
        Self
    }
}

impl ChunkingStrategy for RecursiveChunker {
    fn chunk(
        &self,
        document: &SourceDocument,
        config: &ChunkingConfig,
    ) -> Result<Vec<Chunk>, DomainError> {
        config.validate()?;

        let text = document.content.as_str();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        // Byte offset of every char position, plus the end of the text
        let offsets: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let total = offsets.len() - 1;
        let breakpoints = Breakpoints::new(text, &offsets);

        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let hi = (start + config.chunk_size).min(total);
            let end = if hi == total {
                total
            } else {
                let lo = start + config.chunk_overlap + 1;
                breakpoints.best(lo, hi).unwrap_or(hi)
            };

            chunks.push(Chunk::new(
                document,
                chunks.len(),
                start,
                end,
                &text[offsets[start]..offsets[end]],
            ));

            if end == total {
                break;
            }

            start = end - config.chunk_overlap;
        }

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "recursive"
    }
}
