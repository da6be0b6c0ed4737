// Mon Oct 19 2026 - Alex

//! Borrowed byte views over text corpora.
//!
//! `str::as_bytes` gives each element's UTF-8 bytes without copying, and the
//! returned views borrow the caller's strings, so the compiler guarantees they
//! outlive the scan and are not mutated during it.

/// One view per corpus element, in order.
pub fn to_byte_blocks<S: AsRef<str>>(corpus: &[S]) -> Vec<&[u8]> {
    corpus.iter().map(|element| element.as_ref().as_bytes()).collect()
}

pub fn total_len(blocks: &[&[u8]]) -> usize {
    blocks.iter().map(|block| block.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order_and_lengths() {
        let corpus = ["a foo string", "", "nothing", "naïve"];
        let blocks = to_byte_blocks(&corpus);

        assert_eq!(blocks.len(), corpus.len());
        for (block, element) in blocks.iter().zip(corpus.iter()) {
            assert_eq!(*block, element.as_bytes());
        }
        assert_eq!(blocks[3].len(), "naïve".len());
        assert_eq!(total_len(&blocks), 12 + 7 + 6);
    }

    #[test]
    fn test_views_alias_source() {
        let corpus = vec!["first".to_string(), "second".to_string()];
        let blocks = to_byte_blocks(&corpus);

        for (block, element) in blocks.iter().zip(corpus.iter()) {
            assert_eq!(block.as_ptr(), element.as_ptr());
        }
    }

    #[test]
    fn test_empty_corpus() {
        let corpus: Vec<String> = Vec::new();
        assert!(to_byte_blocks(&corpus).is_empty());
        assert_eq!(total_len(&[]), 0);
    }
}
