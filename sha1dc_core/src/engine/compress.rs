//! SHA-1 block compression.
//!
//! Implements the FIPS 180-4 compression function over 512-bit blocks, in
//! two flavors: a plain pass for digest-only operation, and an
//! instrumented pass that additionally captures everything the collision
//! detector needs (the expanded message schedule and the working state at
//! the recompression anchor steps).

/// SHA-1 block size in bytes.
pub const BLOCK_SIZE: usize = 64;

/// SHA-1 initial hash value.
pub(crate) const INITIAL_STATE: [u32; 5] =
    [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

/// Round constants for the four round groups.
const K: [u32; 4] = [0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xca62c1d6];

/// Steps at which the working state is captured for the detector.
pub(crate) const ANCHOR_STEPS: [usize; 2] = [58, 65];

/// Everything the collision detector needs about one compressed block.
pub(crate) struct BlockTrace {
    /// Expanded 80-word message schedule of the block.
    pub schedule: [u32; 80],
    /// State leaving the block.
    pub ihv_out: [u32; 5],
    /// Working state just before each anchor step, indexed as
    /// `anchors[0]` for step 58 and `anchors[1]` for step 65.
    pub anchors: [[u32; 5]; 2],
}

impl BlockTrace {
    /// Working state captured just before `step`.
    pub fn anchor(&self, step: usize) -> &[u32; 5] {
        match step {
            58 => &self.anchors[0],
            65 => &self.anchors[1],
            _ => unreachable!("no anchor captured for step {step}"),
        }
    }
}

/// Round boolean function for step `t`.
#[inline(always)]
pub(crate) fn round_fn(t: usize, b: u32, c: u32, d: u32) -> u32 {
    match t / 20 {
        0 => (b & c) | (!b & d),
        1 | 3 => b ^ c ^ d,
        2 => (b & c) | (b & d) | (c & d),
        _ => unreachable!(),
    }
}

/// Round constant for step `t`.
#[inline(always)]
pub(crate) fn round_k(t: usize) -> u32 {
    K[t / 20]
}

/// Expand a 64-byte block into the 80-word message schedule.
pub(crate) fn expand(block: &[u8]) -> [u32; 80] {
    debug_assert_eq!(block.len(), BLOCK_SIZE);
    let mut w = [0u32; 80];
    for (i, word) in block.chunks_exact(4).enumerate() {
        w[i] = u32::from_be_bytes([word[0], word[1], word[2], word[3]]);
    }
    for t in 16..80 {
        w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
    }
    w
}

/// One forward compression step.
#[inline(always)]
pub(crate) fn step_forward(t: usize, state: [u32; 5], w: u32) -> [u32; 5] {
    let [a, b, c, d, e] = state;
    let tmp = a
        .rotate_left(5)
        .wrapping_add(round_fn(t, b, c, d))
        .wrapping_add(e)
        .wrapping_add(round_k(t))
        .wrapping_add(w);
    [tmp, a, b.rotate_left(30), c, d]
}

/// One backward compression step: recovers the state before step `t` from
/// the state after it.
#[inline(always)]
pub(crate) fn step_backward(t: usize, state: [u32; 5], w: u32) -> [u32; 5] {
    let [na, nb, nc, nd, ne] = state;
    let a = nb;
    let b = nc.rotate_right(30);
    let c = nd;
    let d = ne;
    let e = na
        .wrapping_sub(a.rotate_left(5))
        .wrapping_sub(round_fn(t, b, c, d))
        .wrapping_sub(round_k(t))
        .wrapping_sub(w);
    [a, b, c, d, e]
}

/// Compress one block into `state`, digest-only.
pub(crate) fn compress(state: &mut [u32; 5], block: &[u8]) {
    let w = expand(block);
    let mut s = *state;
    for (t, &word) in w.iter().enumerate() {
        s = step_forward(t, s, word);
    }
    for (out, add) in state.iter_mut().zip(s) {
        *out = out.wrapping_add(add);
    }
}

/// Compress one block into `state`, capturing the trace the collision
/// detector works from.
pub(crate) fn compress_traced(state: &mut [u32; 5], block: &[u8]) -> BlockTrace {
    let schedule = expand(block);
    let mut anchors = [[0u32; 5]; 2];
    let mut s = *state;
    for (t, &word) in schedule.iter().enumerate() {
        if t == ANCHOR_STEPS[0] {
            anchors[0] = s;
        } else if t == ANCHOR_STEPS[1] {
            anchors[1] = s;
        }
        s = step_forward(t, s, word);
    }
    for (out, add) in state.iter_mut().zip(s) {
        *out = out.wrapping_add(add);
    }
    BlockTrace {
        schedule,
        ihv_out: *state,
        anchors,
    }
}
