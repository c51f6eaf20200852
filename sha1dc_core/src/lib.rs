//! Collision-Detecting SHA-1 Core Library
//!
//! This is the core library of the sha1dc workspace: an incremental SHA-1
//! engine that screens its input against published near-collision attack
//! constructions while hashing. For ordinary input it is a drop-in SHA-1;
//! for engineered colliding input ("SHAttered"-class documents) digest
//! extraction fails with [`Error::CollisionDetected`] instead of handing
//! out a forged identity.
//!
//! ```
//! use sha1dc_core::Sha1Dc;
//!
//! let mut engine = Sha1Dc::new();
//! engine.update(b"test");
//! let digest = engine.finalize().expect("not an engineered collision");
//! assert_eq!(digest.to_hex(), "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3");
//! ```

pub mod engine;
pub mod error;
pub mod hasher;

// Re-export main types
pub use engine::{BLOCK_SIZE, Builder, DIGEST_SIZE, Digest, IngestMode, Sha1Dc};
pub use error::{Error, Result};
pub use hasher::Sha1DcHasher;
