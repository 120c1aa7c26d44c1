//! Park-Miller "minimal standard" generator (MINSTD)
//!
//! Used by the maze generator so that a seed always yields the same maze on
//! every platform. Integer arithmetic only.
//!
//! Constants:
//! - Multiplier (a): 48271
//! - Modulus (m): 2^31 - 1 = 2147483647
//!
//! Reference: https://en.wikipedia.org/wiki/Lehmer_random_number_generator

const MULTIPLIER: u64 = 48271;
const MODULUS: u64 = 2_147_483_647;

/// Deterministic Lehmer generator
#[derive(Clone, Debug)]
pub struct MinStd {
    state: u32,
}

impl MinStd {
    /// Seeds are reduced modulo 2^31 - 1; a zero state is replaced with 1.
    pub fn new(seed: u32) -> Self {
        let state = (seed as u64 % MODULUS) as u32;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Next value in `1..2^31 - 1`.
    pub fn next_u31(&mut self) -> u32 {
        self.state = ((self.state as u64 * MULTIPLIER) % MODULUS) as u32;
        self.state
    }

    /// Uniform-ish index in `0..len`. `len` must be non-zero.
    pub fn below(&mut self, len: usize) -> usize {
        let value = self.next_u31() as u64;
        ((value * len as u64) / MODULUS) as usize
    }
}
