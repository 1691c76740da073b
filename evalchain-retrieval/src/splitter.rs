use std::collections::HashMap;

use thiserror::Error;
use evalchain_core::{Document, Value};

#[derive(Debug, Error)]
pub enum SplitterConfigError {
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,
    #[error("overlap ({overlap}) must be smaller than chunk_size ({chunk_size})")]
    OverlapTooLarge { chunk_size: usize, overlap: usize },
}

pub struct TextSplitter;

impl TextSplitter {
    pub fn split(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
        if chunk_size == 0 {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;
        let chars: Vec<char> = text.chars().collect();
        let max_overlap = chunk_size.saturating_sub(1);
        let clamped_overlap = overlap.min(max_overlap);
        let step = (chunk_size - clamped_overlap).max(1);

        while start < chars.len() {
            let end = usize::min(start + chunk_size, chars.len());
            let chunk: String = chars[start..end].iter().collect();
            chunks.push(chunk);

            if end == chars.len() {
                break;
            }

            start = start.saturating_add(step);
        }

        chunks
    }

    pub fn split_documents(
        docs: &[Document],
        chunk_size: usize,
        overlap: usize,
    ) -> Vec<Document> {
        chunk_documents(docs, |text| Self::split(text, chunk_size, overlap))
    }
}

/// Splits on the coarsest separator present (paragraphs, then lines, then
/// words) and only falls back to fixed character windows for unbroken runs.
pub struct RecursiveCharacterTextSplitter {
    chunk_size: usize,
    overlap: usize,
    separators: Vec<String>,
}

impl RecursiveCharacterTextSplitter {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, SplitterConfigError> {
        if chunk_size == 0 {
            return Err(SplitterConfigError::ZeroChunkSize);
        }
        if overlap >= chunk_size {
            return Err(SplitterConfigError::OverlapTooLarge {
                chunk_size,
                overlap,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
            separators: vec!["\n\n".to_string(), "\n".to_string(), " ".to_string()],
        })
    }

    pub fn with_separators(mut self, separators: Vec<String>) -> Self {
        self.separators = separators;
        self
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        self.atomize(text, &self.separators, &mut pieces);
        self.merge(pieces)
    }

    pub fn split_documents(&self, docs: &[Document]) -> Vec<Document> {
        chunk_documents(docs, |text| self.split(text))
    }

    fn atomize(&self, text: &str, separators: &[String], out: &mut Vec<String>) {
        if text.chars().count() <= self.chunk_size {
            if !text.is_empty() {
                out.push(text.to_string());
            }
            return;
        }

        match separators.split_first() {
            Some((separator, rest)) => {
                if text.contains(separator.as_str()) {
                    for piece in text.split_inclusive(separator.as_str()) {
                        if piece.chars().count() <= self.chunk_size {
                            out.push(piece.to_string());
                        } else {
                            self.atomize(piece, rest, out);
                        }
                    }
                } else {
                    self.atomize(text, rest, out);
                }
            }
            None => out.extend(TextSplitter::split(text, self.chunk_size, 0)),
        }
    }

    fn merge(&self, pieces: Vec<String>) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut current_len = 0usize;

        for piece in pieces {
            let piece_len = piece.chars().count();
            if !current.is_empty() && current_len + piece_len > self.chunk_size {
                chunks.push(current.concat());

                // Carry trailing pieces worth at most `overlap` chars into
                // the next chunk, unless that would push it past chunk_size.
                let mut tail: Vec<String> = Vec::new();
                let mut tail_len = 0usize;
                for prev in current.iter().rev() {
                    let prev_len = prev.chars().count();
                    if tail_len + prev_len > self.overlap {
                        break;
                    }
                    tail_len += prev_len;
                    tail.insert(0, prev.clone());
                }
                if tail_len + piece_len > self.chunk_size {
                    tail.clear();
                    tail_len = 0;
                }
                current = tail;
                current_len = tail_len;
            }

            current_len += piece_len;
            current.push(piece);
        }

        if !current.is_empty() {
            let chunk = current.concat();
            if !chunk.trim().is_empty() {
                chunks.push(chunk);
            }
        }

        chunks
    }
}

fn chunk_documents<F>(docs: &[Document], split: F) -> Vec<Document>
where
    F: Fn(&str) -> Vec<String>,
{
    let mut out = Vec::new();
    for doc in docs {
        for (index, chunk) in split(&doc.content).into_iter().enumerate() {
            let mut metadata: HashMap<String, Value> = doc.metadata.clone();
            metadata.insert("chunk".to_string(), Value::from(index as u64));
            out.push(Document {
                id: format!("{}#{}", doc.id, index),
                content: chunk,
                metadata,
                embedding: None,
            });
        }
    }
    out
}
