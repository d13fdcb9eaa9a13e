use async_trait::async_trait;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::{Chunk, CollectionId, PageText};

/// Fixed-size character windows over each page with a constant overlap.
///
/// A window that does not reach the end of its page is shortened to the last
/// paragraph break, line break or space found after the overlap region, so
/// chunks tend to end on whole words. The next window always starts exactly
/// `chunk_overlap` characters before the previous one ended.
#[derive(Debug)]
pub struct SlidingWindowSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl SlidingWindowSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, TextSplitterError> {
        if chunk_overlap >= chunk_size {
            return Err(TextSplitterError::InvalidConfiguration(format!(
                "chunk_overlap ({chunk_overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Returns `(start, end)` char ranges covering `chars`.
    fn windows(&self, chars: &[char]) -> Vec<(usize, usize)> {
        let total = chars.len();
        let mut windows = Vec::new();
        let mut start = 0;

        while start < total {
            let hard_end = (start + self.chunk_size).min(total);
            if hard_end == total {
                windows.push((start, total));
                break;
            }

            let end = self
                .boundary(chars, start + self.chunk_overlap + 1, hard_end)
                .unwrap_or(hard_end);
            windows.push((start, end));
            start = end - self.chunk_overlap;
        }

        windows
    }

    /// Latest break position in `[lower, upper]`, preferring paragraph breaks
    /// over line breaks over spaces. A position `p` means the window ends
    /// right after `chars[p - 1]`.
    fn boundary(&self, chars: &[char], lower: usize, upper: usize) -> Option<usize> {
        if lower > upper {
            return None;
        }
        let candidates = || (lower..=upper).rev();

        candidates()
            .find(|&p| p >= 2 && chars[p - 1] == '\n' && chars[p - 2] == '\n')
            .or_else(|| candidates().find(|&p| chars[p - 1] == '\n'))
            .or_else(|| candidates().find(|&p| chars[p - 1] == ' '))
    }
}

#[async_trait]
impl TextSplitter for SlidingWindowSplitter {
    async fn split(
        &self,
        pages: &[PageText],
        collection_id: &CollectionId,
    ) -> Result<Vec<Chunk>, TextSplitterError> {
        let mut chunks = Vec::new();

        for page in pages.iter().filter(|p| !p.is_blank()) {
            let chars: Vec<char> = page.text.chars().collect();
            for (start, end) in self.windows(&chars) {
                chunks.push(Chunk::new(
                    chars[start..end].iter().collect(),
                    collection_id.clone(),
                    Some(page.page),
                    start,
                ));
            }
        }

        tracing::debug!(
            pages = pages.len(),
            chunks = chunks.len(),
            chunk_size = self.chunk_size,
            chunk_overlap = self.chunk_overlap,
            "Pages split into chunks"
        );
        Ok(chunks)
    }
}
