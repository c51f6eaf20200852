//! Deterministic test-data builders and chunking plans.

/// Builds reproducible pseudo-random byte sequences for tests. The same
/// seed and length always produce the same bytes, so failures are
/// replayable without recording inputs.
#[derive(Debug, Clone)]
pub struct TestDataBuilder {
    seed: u64,
    len: usize,
}

impl Default for TestDataBuilder {
    fn default() -> Self {
        Self {
            seed: 0x5eed_1dc0,
            len: 1024,
        }
    }
}

impl TestDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generator seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the output length in bytes.
    pub fn len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    /// Produce the byte sequence (xorshift64* stream).
    pub fn build(&self) -> Vec<u8> {
        let mut state = self.seed | 1;
        let mut out = Vec::with_capacity(self.len);
        while out.len() < self.len {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let word = state.wrapping_mul(0x2545_f491_4f6c_dd1d);
            for byte in word.to_le_bytes() {
                if out.len() == self.len {
                    break;
                }
                out.push(byte);
            }
        }
        out
    }
}

/// How to slice a message into streaming calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkPlan {
    /// The whole message in one call.
    Single,
    /// One call per byte.
    EveryByte,
    /// Fixed-size calls.
    Fixed(usize),
    /// Sizes straddling the 64-byte block boundary: 1, 63, 64, 65, 127,
    /// 128, repeating.
    BlockStraddle,
}

impl ChunkPlan {
    /// Split `data` into the chunks this plan prescribes. Chunks
    /// concatenate back to exactly `data`.
    pub fn split<'a>(&self, data: &'a [u8]) -> Vec<&'a [u8]> {
        let sizes: Box<dyn Iterator<Item = usize>> = match *self {
            ChunkPlan::Single => Box::new(std::iter::once(data.len().max(1))),
            ChunkPlan::EveryByte => Box::new(std::iter::repeat(1)),
            ChunkPlan::Fixed(n) => Box::new(std::iter::repeat(n.max(1))),
            ChunkPlan::BlockStraddle => {
                Box::new([1usize, 63, 64, 65, 127, 128].into_iter().cycle())
            }
        };

        let mut chunks = Vec::new();
        let mut rest = data;
        for size in sizes {
            if rest.is_empty() {
                break;
            }
            let take = size.min(rest.len());
            chunks.push(&rest[..take]);
            rest = &rest[take..];
        }
        chunks
    }
}
