//! Error types for the collision-detecting SHA-1 engine.
//!
//! The taxonomy is deliberately narrow. Programmer errors (out-of-range
//! offsets and lengths, misuse of a moved-out value) are contract
//! violations and panic via ordinary slice indexing and ownership rules
//! rather than surfacing as error values. Allocation failure has no
//! fallible surface here: the engine state is a fixed-size value and Rust
//! aborts on heap exhaustion. What remains is the one outcome callers
//! must actually handle.

use thiserror::Error;

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// The consumed input matches the fingerprint of a known SHA-1
    /// collision-attack construction.
    ///
    /// This is an expected outcome on adversarial input, not a bug: the
    /// input was engineered to share its digest with another message, so
    /// the digest must not be trusted as an identity. Callers must treat
    /// this as a security-relevant rejection and must not substitute any
    /// fallback digest for the input.
    #[error("input matches a known SHA-1 collision attack pattern; digest withheld")]
    CollisionDetected,
}
