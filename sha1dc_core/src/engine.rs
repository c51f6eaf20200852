//! The collision-detecting SHA-1 engine.
//!
//! [`Sha1Dc`] is an incremental SHA-1 hasher that, in parallel with
//! digesting, screens every 512-bit block against the catalogue of
//! published near-collision attack constructions. For ordinary input the
//! digest is bit-identical to standard SHA-1; for input engineered to
//! collide ("SHAttered"-class documents) [`Sha1Dc::finalize`] refuses to
//! hand out the digest and reports [`Error::CollisionDetected`] instead.
//!
//! The engine is a plain owned value: cloning snapshots the full hashing
//! and detection state, dropping releases it, and no operation suspends or
//! performs I/O. A single engine is not meant for concurrent mutation;
//! clones are fully independent.

use std::fmt;

use crate::error::{Error, Result};

mod compress;
mod detect;
mod dv;

use detect::Detector;

pub use compress::BLOCK_SIZE;

/// SHA-1 digest size in bytes.
pub const DIGEST_SIZE: usize = 20;

/// How [`Sha1Dc::update`] moves caller bytes into the engine.
///
/// Both strategies produce bit-identical digests; they differ only in
/// which memory the compression function reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestMode {
    /// Process full blocks directly from the caller's slice. The borrow
    /// rules guarantee the slice is stable for the duration of the call,
    /// so this is the default.
    #[default]
    Stable,
    /// Stage every byte through the engine-owned block buffer before
    /// compressing. Useful when callers want the engine to never read
    /// from their memory outside the staging copy.
    Copy,
}

/// A finished 20-byte SHA-1 digest, big-endian word order.
///
/// Only obtainable from a successful [`Sha1Dc::finalize`]; a digest value
/// therefore always belongs to input that passed collision screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Lowercase hex rendering of the digest.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Digest> for [u8; DIGEST_SIZE] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

/// Configures and builds a [`Sha1Dc`] engine.
#[derive(Debug, Clone)]
pub struct Builder {
    detect_collisions: bool,
    ingest_mode: IngestMode,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            detect_collisions: true,
            ingest_mode: IngestMode::default(),
        }
    }
}

impl Builder {
    /// Toggle collision screening. With screening off the engine behaves
    /// as a plain SHA-1 and [`Sha1Dc::finalize`] cannot fail.
    pub fn detect_collisions(mut self, detect: bool) -> Self {
        self.detect_collisions = detect;
        self
    }

    /// Select the default ingestion strategy for [`Sha1Dc::update`].
    pub fn ingest_mode(mut self, mode: IngestMode) -> Self {
        self.ingest_mode = mode;
        self
    }

    /// Build the engine in its initial (empty) state.
    pub fn build(self) -> Sha1Dc {
        Sha1Dc {
            state: compress::INITIAL_STATE,
            count: 0,
            buffer: [0; BLOCK_SIZE],
            buffer_len: 0,
            detector: Detector::new(),
            detect_collisions: self.detect_collisions,
            ingest_mode: self.ingest_mode,
        }
    }
}

/// Incremental SHA-1 engine with collision detection.
///
/// Allocation never fails under normal memory availability; the state is
/// a fixed-size value with no heap indirection. Out-of-range offsets and
/// lengths are expressed as slice indexing on the caller side and panic,
/// as contract violations should.
#[derive(Clone)]
pub struct Sha1Dc {
    /// Running digest state, five 32-bit words.
    state: [u32; 5],
    /// Total bytes consumed since construction or reset.
    count: u64,
    /// Partial-block staging buffer.
    buffer: [u8; BLOCK_SIZE],
    /// Valid bytes in `buffer`, always < [`BLOCK_SIZE`].
    buffer_len: usize,
    /// Cross-block attack evidence.
    detector: Detector,
    detect_collisions: bool,
    ingest_mode: IngestMode,
}

impl Default for Sha1Dc {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sha1Dc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha1Dc")
            .field("bytes_consumed", &self.count)
            .field("buffered", &self.buffer_len)
            .field("evidence", &self.detector.evidence())
            .field("ingest_mode", &self.ingest_mode)
            .finish()
    }
}

impl Sha1Dc {
    /// Create an engine with collision detection on and the default
    /// ingestion strategy.
    pub fn new() -> Self {
        Builder::default().build()
    }

    /// Create an engine with a specific ingestion strategy.
    pub fn with_ingest(mode: IngestMode) -> Self {
        Builder::default().ingest_mode(mode).build()
    }

    /// Start configuring an engine.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The ingestion strategy used by [`Sha1Dc::update`].
    pub fn ingest_mode(&self) -> IngestMode {
        self.ingest_mode
    }

    /// Change the ingestion strategy in place; hashing progress is kept.
    pub fn set_ingest_mode(&mut self, mode: IngestMode) {
        self.ingest_mode = mode;
    }

    /// Total bytes consumed since construction or the last reset.
    pub fn bytes_consumed(&self) -> u64 {
        self.count
    }

    /// Return the engine to its initial state in place. Identity and
    /// ingestion strategy are kept; hashing state and attack evidence are
    /// cleared together.
    pub fn reset(&mut self) {
        self.state = compress::INITIAL_STATE;
        self.count = 0;
        self.buffer_len = 0;
        self.detector.reset();
    }

    /// Feed a single byte.
    pub fn update_byte(&mut self, byte: u8) {
        self.count = self.count.wrapping_add(1);
        self.buffer[self.buffer_len] = byte;
        self.buffer_len += 1;
        if self.buffer_len == BLOCK_SIZE {
            let block = self.buffer;
            self.process_block(&block);
            self.buffer_len = 0;
        }
    }

    /// Feed a byte slice using the engine's configured ingestion
    /// strategy.
    pub fn update(&mut self, data: &[u8]) {
        match self.ingest_mode {
            IngestMode::Stable => self.update_stable(data),
            IngestMode::Copy => self.update_copied(data),
        }
    }

    /// Feed a byte slice, compressing full blocks directly from the
    /// caller's memory. Blocks are consumed strictly in stream order.
    pub fn update_stable(&mut self, data: &[u8]) {
        self.count = self.count.wrapping_add(data.len() as u64);

        let mut rest = data;
        if self.buffer_len > 0 {
            let take = (BLOCK_SIZE - self.buffer_len).min(rest.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&rest[..take]);
            self.buffer_len += take;
            rest = &rest[take..];
            if self.buffer_len < BLOCK_SIZE {
                return;
            }
            let block = self.buffer;
            self.process_block(&block);
            self.buffer_len = 0;
        }

        let mut blocks = rest.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            self.process_block(block);
        }
        let tail = blocks.remainder();
        self.buffer[..tail.len()].copy_from_slice(tail);
        self.buffer_len = tail.len();
    }

    /// Feed a byte slice, staging every byte through the engine-owned
    /// buffer before compression. Bit-identical to [`update_stable`].
    ///
    /// [`update_stable`]: Sha1Dc::update_stable
    pub fn update_copied(&mut self, data: &[u8]) {
        self.count = self.count.wrapping_add(data.len() as u64);

        let mut rest = data;
        while !rest.is_empty() {
            let take = (BLOCK_SIZE - self.buffer_len).min(rest.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&rest[..take]);
            self.buffer_len += take;
            rest = &rest[take..];
            if self.buffer_len == BLOCK_SIZE {
                let block = self.buffer;
                self.process_block(&block);
                self.buffer_len = 0;
            }
        }
    }

    /// Pad the accumulated input and extract the digest.
    ///
    /// Padding and the resulting one or two extra blocks are processed on
    /// local copies of the state, so the engine itself is never mutated:
    /// repeated calls return the same result, and streaming may continue
    /// afterwards as if finalize had not been called.
    ///
    /// Fails with [`Error::CollisionDetected`] when the consumed input
    /// matches an engineered collision construction. The digest of such
    /// input is still well defined, it is just not handed out.
    pub fn finalize(&self) -> Result<Digest> {
        let mut state = self.state;
        let mut detector = self.detector.clone();

        let mut pad = [0u8; 2 * BLOCK_SIZE];
        let len = self.buffer_len;
        pad[..len].copy_from_slice(&self.buffer[..len]);
        pad[len] = 0x80;
        let padded_len = if len < 56 { BLOCK_SIZE } else { 2 * BLOCK_SIZE };
        let bit_count = self.count.wrapping_mul(8);
        pad[padded_len - 8..padded_len].copy_from_slice(&bit_count.to_be_bytes());

        for block in pad[..padded_len].chunks_exact(BLOCK_SIZE) {
            Self::process_block_into(
                &mut state,
                &mut detector,
                self.detect_collisions,
                block,
            );
        }

        if detector.evidence() {
            return Err(Error::CollisionDetected);
        }

        let mut digest = [0u8; DIGEST_SIZE];
        for (chunk, word) in digest.chunks_exact_mut(4).zip(state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        Ok(Digest(digest))
    }

    /// One-shot: hash `data` with collision detection.
    pub fn digest(data: &[u8]) -> Result<Digest> {
        let mut engine = Self::new();
        engine.update(data);
        engine.finalize()
    }

    fn process_block(&mut self, block: &[u8]) {
        Self::process_block_into(
            &mut self.state,
            &mut self.detector,
            self.detect_collisions,
            block,
        );
    }

    /// Compress one block and hand it to the detector, in that order.
    fn process_block_into(
        state: &mut [u32; 5],
        detector: &mut Detector,
        detect: bool,
        block: &[u8],
    ) {
        if detect {
            let trace = compress::compress_traced(state, block);
            detector.examine_block(&trace);
        } else {
            compress::compress(state, block);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sha1::{Digest as _, Sha1};

    fn oracle(data: &[u8]) -> String {
        format!("{:x}", Sha1::digest(data))
    }

    /// Hashing the ASCII bytes "test" must produce the reference digest.
    #[test]
    fn test_known_vector() {
        let digest = Sha1Dc::digest(b"test").unwrap();
        assert_eq!(digest.to_hex(), "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3");
    }

    /// Reset must behave exactly like a freshly allocated engine.
    #[test]
    fn test_reset_matches_fresh_engine() {
        let mut engine = Sha1Dc::new();
        engine.update(b"test");
        engine.reset();
        engine.update(b"test_hash");
        assert_eq!(
            engine.finalize().unwrap().to_hex(),
            "327d106bf608b1f63bf5cbc5d1b6ea2d6836b446"
        );
    }

    /// Byte-at-a-time ingestion must match bulk ingestion.
    #[test]
    fn test_single_byte_ingestion() {
        let mut engine = Sha1Dc::new();
        for &byte in b"test" {
            engine.update_byte(byte);
        }
        assert_eq!(
            engine.finalize().unwrap().to_hex(),
            "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3"
        );
    }

    /// Digests must equal the reference SHA-1 oracle at block boundaries
    /// and around them.
    #[test]
    fn test_boundary_lengths_against_oracle() {
        for len in [0, 1, 55, 56, 57, 63, 64, 65, 127, 128, 129, 192, 256, 1000] {
            let data: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
            let digest = Sha1Dc::digest(&data).unwrap();
            assert_eq!(digest.to_hex(), oracle(&data), "length {len}");
        }
    }

    /// Both ingestion strategies, mixed across arbitrary call boundaries,
    /// must agree with a one-shot hash of the same bytes.
    #[test]
    fn test_strategy_mix_equivalence() {
        let data: Vec<u8> = (0..731).map(|i| (i * 7 % 256) as u8).collect();

        let mut engine = Sha1Dc::new();
        engine.update_stable(&data[..100]);
        engine.update_copied(&data[100..163]);
        for &byte in &data[163..170] {
            engine.update_byte(byte);
        }
        engine.set_ingest_mode(IngestMode::Copy);
        engine.update(&data[170..600]);
        engine.set_ingest_mode(IngestMode::Stable);
        engine.update(&data[600..]);

        assert_eq!(engine.finalize().unwrap(), Sha1Dc::digest(&data).unwrap());
    }

    /// A clone must diverge independently from its original.
    #[test]
    fn test_clone_divergence() {
        let mut engine = Sha1Dc::new();
        engine.update(b"te");

        let mut cloned = engine.clone();
        cloned.update(b"st_hash");
        assert_eq!(
            cloned.finalize().unwrap().to_hex(),
            "327d106bf608b1f63bf5cbc5d1b6ea2d6836b446"
        );

        engine.update(b"st");
        assert_eq!(
            engine.finalize().unwrap().to_hex(),
            "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3"
        );
    }

    /// Finalize must not mutate the engine: calling it twice gives the
    /// same digest, and streaming can continue afterwards.
    #[test]
    fn test_finalize_is_idempotent() {
        let mut engine = Sha1Dc::new();
        engine.update(b"test");

        let first = engine.finalize().unwrap();
        let second = engine.finalize().unwrap();
        assert_eq!(first, second);

        engine.update(b"_hash");
        assert_eq!(
            engine.finalize().unwrap().to_hex(),
            oracle(b"test_hash"),
            "stream must continue past a finalize"
        );
    }

    /// The byte counter tracks consumption across all ingestion paths.
    #[test]
    fn test_bytes_consumed() {
        let mut engine = Sha1Dc::new();
        assert_eq!(engine.bytes_consumed(), 0);
        engine.update_byte(0);
        engine.update_stable(&[0; 100]);
        engine.update_copied(&[0; 29]);
        assert_eq!(engine.bytes_consumed(), 130);
        engine.reset();
        assert_eq!(engine.bytes_consumed(), 0);
    }

    /// Changing the ingestion strategy keeps hashing progress.
    #[test]
    fn test_set_ingest_mode_preserves_progress() {
        let mut engine = Sha1Dc::with_ingest(IngestMode::Copy);
        assert_eq!(engine.ingest_mode(), IngestMode::Copy);
        engine.update(b"te");
        engine.set_ingest_mode(IngestMode::Stable);
        engine.update(b"st");
        assert_eq!(engine.finalize().unwrap().to_hex(), oracle(b"test"));
    }

    /// With detection off the engine is a plain SHA-1.
    #[test]
    fn test_builder_detection_off() {
        let mut engine = Sha1Dc::builder().detect_collisions(false).build();
        engine.update(b"test");
        assert_eq!(engine.finalize().unwrap().to_hex(), oracle(b"test"));
    }

    /// Digest formatting and byte accessors agree.
    #[test]
    fn test_digest_rendering() {
        let digest = Sha1Dc::digest(b"").unwrap();
        assert_eq!(digest.to_string(), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(digest.as_bytes().len(), DIGEST_SIZE);
        assert_eq!(hex::encode(digest.as_ref()), digest.to_hex());
    }

    proptest! {
        /// Arbitrary input hashes to the reference SHA-1 digest.
        #[test]
        fn test_oracle_equivalence(data: Vec<u8>) {
            let digest = Sha1Dc::digest(&data).unwrap();
            prop_assert_eq!(digest.to_hex(), oracle(&data));
        }

        /// Arbitrary chunkings of the same bytes agree with the one-shot
        /// digest, for both ingestion strategies.
        #[test]
        fn test_chunking_equivalence(
            data: Vec<u8>,
            cuts in proptest::collection::vec(0usize..=1024, 0..8),
        ) {
            let expected = Sha1Dc::digest(&data).unwrap();
            for mode in [IngestMode::Stable, IngestMode::Copy] {
                let mut engine = Sha1Dc::with_ingest(mode);
                let mut rest: &[u8] = &data;
                for &cut in &cuts {
                    let take = cut.min(rest.len());
                    engine.update(&rest[..take]);
                    rest = &rest[take..];
                }
                engine.update(rest);
                prop_assert_eq!(engine.finalize().unwrap(), expected);
            }
        }
    }
}
