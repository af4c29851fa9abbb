//! Chunk arithmetic.
//!
//! Actual slicing uses `slice::chunks`; this module only pins down the
//! count so callers can assert how many transactions a batch will need.

/// Number of chunks `len` items produce at `chunk_size` items per chunk.
///
/// A `chunk_size` of zero means "no limit": everything goes in one chunk
/// (zero for an empty batch).
pub fn chunk_count(len: usize, chunk_size: usize) -> usize {
    if chunk_size == 0 {
        return usize::from(len > 0);
    }
    len.div_ceil(chunk_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple() {
        assert_eq!(chunk_count(120, 60), 2);
    }

    #[test]
    fn remainder_adds_a_chunk() {
        assert_eq!(chunk_count(121, 60), 3);
        assert_eq!(chunk_count(1, 60), 1);
    }

    #[test]
    fn empty_batch_has_no_chunks() {
        assert_eq!(chunk_count(0, 60), 0);
        assert_eq!(chunk_count(0, 0), 0);
    }

    #[test]
    fn zero_chunk_size_means_unlimited() {
        assert_eq!(chunk_count(500, 0), 1);
    }
}
