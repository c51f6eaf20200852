//! Collision detection over compressed blocks.
//!
//! After every block compression the detector replays the block against
//! the disturbance-vector catalogue: for each vector it XORs the vector's
//! message differential into the block's schedule, recompresses backward
//! from the anchor step to recover the sibling block's would-be input
//! state and forward to step 79 for its would-be output state. A sibling
//! whose output state equals the block's actual output state is the other
//! half of an engineered near-collision pair, so the evidence flag is
//! latched for the rest of the stream.
//!
//! The canonical library optionally prescreens vectors with unavoidable
//! bit conditions before recompressing; that prescreen is a pure
//! performance filter and is not implemented here, so every vector is
//! recompressed for every block.

use log::warn;

use super::compress::{BlockTrace, step_backward, step_forward};
use super::dv::SHA1_DVS;

/// Cross-block attack evidence, latched once any block matches a
/// catalogued attack construction.
#[derive(Debug, Clone, Default)]
pub(crate) struct Detector {
    pub(crate) evidence: bool,
}

impl Detector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear accumulated evidence, in lockstep with a hash-state reset.
    pub fn reset(&mut self) {
        self.evidence = false;
    }

    /// Whether any block so far matched an attack construction.
    pub fn evidence(&self) -> bool {
        self.evidence
    }

    /// Examine one compressed block for attack constructions.
    pub fn examine_block(&mut self, trace: &BlockTrace) {
        for dv in &SHA1_DVS {
            let mut sibling = trace.schedule;
            for (word, diff) in sibling.iter_mut().zip(dv.dm) {
                *word ^= diff;
            }
            let (_, ihv_out) = recompress(dv.test_step, &sibling, trace.anchor(dv.test_step));
            if ihv_out == trace.ihv_out {
                warn!(
                    "input matches the SHA-1 near-collision construction {}",
                    dv.name()
                );
                self.evidence = true;
                break;
            }
        }
    }
}

/// Recompress a full block from the working state before `test_step`,
/// using the schedule `w`: backward to recover the input state, forward to
/// step 79, then the usual feed-forward for the output state.
pub(crate) fn recompress(
    test_step: usize,
    w: &[u32; 80],
    anchor: &[u32; 5],
) -> ([u32; 5], [u32; 5]) {
    let mut s = *anchor;
    for t in (0..test_step).rev() {
        s = step_backward(t, s, w[t]);
    }
    let ihv_in = s;

    s = *anchor;
    for (t, &word) in w.iter().enumerate().skip(test_step) {
        s = step_forward(t, s, word);
    }
    let mut ihv_out = ihv_in;
    for (out, add) in ihv_out.iter_mut().zip(s) {
        *out = out.wrapping_add(add);
    }
    (ihv_in, ihv_out)
}
