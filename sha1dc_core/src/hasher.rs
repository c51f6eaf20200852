//! Fluent hasher adapter over the engine.
//!
//! [`Sha1DcHasher`] wraps [`Sha1Dc`] with convenience encoders for
//! multi-byte primitives, decomposing each into ordered byte emission:
//! little-endian byte order for numeric types, raw IEEE-754 bits for
//! floats, UTF-8 for text. It adds no hashing logic of its own.

use crate::engine::{Digest, IngestMode, Sha1Dc};
use crate::error::Result;

/// Streaming hasher with primitive-type encoders.
#[derive(Debug, Clone, Default)]
pub struct Sha1DcHasher {
    engine: Sha1Dc,
}

impl Sha1DcHasher {
    /// Create a hasher over a fresh engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher with a specific ingestion strategy.
    pub fn with_ingest(mode: IngestMode) -> Self {
        Self {
            engine: Sha1Dc::with_ingest(mode),
        }
    }

    /// Wrap an already-configured engine.
    pub fn from_engine(engine: Sha1Dc) -> Self {
        Self { engine }
    }

    /// Access the underlying engine.
    pub fn engine(&self) -> &Sha1Dc {
        &self.engine
    }

    /// Feed a single byte.
    pub fn put_byte(&mut self, byte: u8) -> &mut Self {
        self.engine.update_byte(byte);
        self
    }

    /// Feed a byte slice.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.engine.update(bytes);
        self
    }

    /// Feed a bool as a single `0`/`1` byte.
    pub fn put_bool(&mut self, value: bool) -> &mut Self {
        self.put_byte(value as u8)
    }

    /// Feed a `u16` in little-endian byte order.
    pub fn put_u16(&mut self, value: u16) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }

    /// Feed a `u32` in little-endian byte order.
    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }

    /// Feed a `u64` in little-endian byte order.
    pub fn put_u64(&mut self, value: u64) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }

    /// Feed an `i16` in little-endian byte order.
    pub fn put_i16(&mut self, value: i16) -> &mut Self {
        self.put_u16(value as u16)
    }

    /// Feed an `i32` in little-endian byte order.
    pub fn put_i32(&mut self, value: i32) -> &mut Self {
        self.put_u32(value as u32)
    }

    /// Feed an `i64` in little-endian byte order.
    pub fn put_i64(&mut self, value: i64) -> &mut Self {
        self.put_u64(value as u64)
    }

    /// Feed an `f32` as its raw IEEE-754 bits, little-endian.
    pub fn put_f32(&mut self, value: f32) -> &mut Self {
        self.put_u32(value.to_bits())
    }

    /// Feed an `f64` as its raw IEEE-754 bits, little-endian.
    pub fn put_f64(&mut self, value: f64) -> &mut Self {
        self.put_u64(value.to_bits())
    }

    /// Feed a string as UTF-8 bytes.
    pub fn put_str(&mut self, value: &str) -> &mut Self {
        self.put_bytes(value.as_bytes())
    }

    /// Finalize and extract the digest; collision screening applies as in
    /// [`Sha1Dc::finalize`].
    pub fn hash(&self) -> Result<Digest> {
        self.engine.finalize()
    }
}
