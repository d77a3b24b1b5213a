//! Fixed-size overlapping chunking on separator boundaries

use docqa_core::{Chunk, Error, Result};

use crate::ingest::SourceLine;

/// Splits text into chunks of at most `chunk_size` characters, cutting only at
/// separator boundaries, with consecutive chunks sharing up to `overlap`
/// characters of trailing/leading content.
#[derive(Debug, Clone)]
pub struct Chunker {
    chunk_size: usize,
    overlap: usize,
    separator: char,
}

impl Chunker {
    pub fn new(chunk_size: usize, overlap: usize, separator: char) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidInput("chunk_size must be >= 1".to_string()));
        }
        if overlap >= chunk_size {
            return Err(Error::InvalidInput(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
            separator,
        })
    }

    /// Split one string into overlapping chunks.
    ///
    /// Input no longer than `chunk_size` comes back as a single unchanged
    /// chunk. A single token longer than `chunk_size` cannot be cut (splits
    /// happen only at separator boundaries) and becomes its own oversized
    /// chunk.
    pub fn split(&self, text: &str) -> Vec<String> {
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }

        let tokens: Vec<&str> = text.split(self.separator).collect();
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for token in tokens {
            if current.is_empty() || joined_len(&current) + 1 + char_len(token) <= self.chunk_size {
                current.push(token);
                continue;
            }

            chunks.push(self.join(&current));

            // Seed the next chunk with the tail of the finished one, then
            // shrink the seed until the incoming token fits.
            let mut seed = self.tail_overlap(&current);
            while !seed.is_empty() && joined_len(&seed) + 1 + char_len(token) > self.chunk_size {
                seed.remove(0);
            }
            seed.push(token);
            current = seed;
        }

        if !current.is_empty() {
            chunks.push(self.join(&current));
        }

        chunks
    }

    /// Chunk every line, each produced chunk inheriting its parent's source
    pub fn chunk_lines(&self, lines: &[SourceLine]) -> Vec<Chunk> {
        lines
            .iter()
            .flat_map(|line| {
                self.split(&line.text)
                    .into_iter()
                    .map(|text| Chunk::new(text, line.source.clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn join(&self, tokens: &[&str]) -> String {
        tokens.join(&self.separator.to_string())
    }

    /// Longest suffix of `tokens` whose joined length is at most `overlap`
    fn tail_overlap<'a>(&self, tokens: &[&'a str]) -> Vec<&'a str> {
        let mut seed: Vec<&str> = Vec::new();
        let mut total = 0;

        for token in tokens.iter().rev() {
            let added = if seed.is_empty() {
                char_len(token)
            } else {
                char_len(token) + 1
            };
            if total + added > self.overlap {
                break;
            }
            total += added;
            seed.insert(0, token);
        }

        seed
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn joined_len(tokens: &[&str]) -> usize {
    if tokens.is_empty() {
        return 0;
    }
    tokens.iter().map(|t| char_len(t)).sum::<usize>() + tokens.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_short_input_yields_single_unchanged_chunk() {
        let chunker = Chunker::new(50, 10, ' ').unwrap();
        let chunks = chunker.split("a short line");
        assert_eq!(chunks, vec!["a short line".to_string()]);
    }

    #[test]
    fn test_every_chunk_within_size() {
        let chunker = Chunker::new(20, 5, ' ').unwrap();
        let text = "one two three four five six seven eight nine ten eleven twelve";
        for chunk in chunker.split(text) {
            assert!(chunk.chars().count() <= 20, "oversized chunk: {:?}", chunk);
        }
    }

    #[test]
    fn test_splits_only_at_separator_boundaries() {
        let chunker = Chunker::new(20, 5, ' ').unwrap();
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let tokens: Vec<&str> = text.split(' ').collect();

        for chunk in chunker.split(text) {
            let chunk_tokens: Vec<&str> = chunk.split(' ').collect();
            let found = tokens
                .windows(chunk_tokens.len())
                .any(|window| window == chunk_tokens.as_slice());
            assert!(found, "chunk cuts mid-token: {:?}", chunk);
        }
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        // Uniform 2-char tokens make the overlap exact: the seed is "aa aa",
        // 5 characters.
        let chunker = Chunker::new(11, 5, ' ').unwrap();
        let text = "aa aa aa aa aa aa aa aa";
        let chunks = chunker.split(text);

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            assert!(
                pair[1].starts_with("aa aa "),
                "missing overlap between {:?} and {:?}",
                pair[0],
                pair[1]
            );
            assert!(pair[0].ends_with("aa aa"));
        }
    }

    #[test]
    fn test_reconstruction_after_removing_overlap() {
        let chunker = Chunker::new(25, 8, ' ').unwrap();
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let chunks = chunker.split(text);
        assert!(chunks.len() > 1);

        let mut rebuilt = chunks[0].clone();
        for pair in chunks.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            // The next chunk begins with the longest prefix that is a suffix
            // of the previous chunk ending on a separator boundary.
            let mut stripped = next.as_str();
            for (i, c) in next.char_indices().rev() {
                if c != ' ' {
                    continue;
                }
                if prev.ends_with(&next[..i]) {
                    stripped = &next[i + 1..];
                    break;
                }
            }
            rebuilt.push(' ');
            rebuilt.push_str(stripped);
        }

        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_oversized_token_becomes_own_chunk() {
        let chunker = Chunker::new(10, 3, ' ').unwrap();
        let text = "ok anextremelylongtoken ok ok ok";
        let chunks = chunker.split(text);
        assert!(chunks.iter().any(|c| c.contains("anextremelylongtoken")));
        // The long token is intact, never cut mid-token
        assert!(
            chunks
                .iter()
                .all(|c| !c.contains("anextremelylongtok ") && !c.starts_with("gtoken"))
        );
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk_size() {
        assert!(Chunker::new(10, 10, ' ').is_err());
        assert!(Chunker::new(0, 0, ' ').is_err());
        assert!(Chunker::new(10, 9, ' ').is_ok());
    }

    #[test]
    fn test_chunks_inherit_parent_source() {
        let chunker = Chunker::new(15, 4, ' ').unwrap();
        let lines = vec![
            SourceLine {
                text: "one two three four five six".to_string(),
                source: PathBuf::from("a.txt"),
            },
            SourceLine {
                text: "short".to_string(),
                source: PathBuf::from("b.txt"),
            },
        ];

        let chunks = chunker.chunk_lines(&lines);
        assert!(chunks.len() > 2);
        let last = chunks.last().unwrap();
        assert_eq!(last.text, "short");
        assert_eq!(last.source, PathBuf::from("b.txt"));
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.source, PathBuf::from("a.txt"));
        }
    }
}
