//! Replay of the C library's `srand`/`rand` pair
//!
//! The challenge service perturbs its solution with `rand()` after seeding
//! with `srand(time(NULL))`. To predict those perturbations the generator
//! has to be reproduced bit for bit. This is glibc's default `TYPE_3`
//! generator: an additive lagged Fibonacci generator over 31 words of
//! 32 bit state with taps 31 and 3,
//!
//! ```text
//! r[i] = r[i - 31] + r[i - 3]   (mod 2^32)
//! rand() = r[i] >> 1
//! ```
//!
//! with the first 31 words filled by the Park-Miller minimal standard
//! generator and the first 310 outputs thrown away.

use rand_core::{impls, Error, RngCore, SeedableRng};

const DEG: usize = 31;
const SEP: usize = 3;
const DISCARD: usize = DEG * 10;

/// Bit-exact glibc `rand()`
#[derive(Clone, Debug)]
pub struct GlibcRand {
    state: [u32; DEG],
    front: usize,
    rear: usize,
}

impl GlibcRand {
    /// Equivalent of `srand(seed)`.
    pub fn new(seed: u32) -> Self {
        // glibc replaces a zero seed, the multiplicative recurrence would stay at 0
        let seed = if seed == 0 { 1 } else { seed };

        let mut state = [0u32; DEG];
        state[0] = seed;
        // the recurrence runs on signed words, seeds >= 2^31 start out negative
        let mut word = i64::from(seed as i32);
        for slot in state.iter_mut().skip(1) {
            // Schrage's method for 16807 * word % 2147483647 without overflow
            let hi = word / 127_773;
            let lo = word % 127_773;
            word = 16_807 * lo - 2_836 * hi;
            if word < 0 {
                word += 2_147_483_647;
            }
            *slot = word as u32;
        }

        let mut rng = GlibcRand {
            state,
            front: SEP,
            rear: 0,
        };
        for _ in 0..DISCARD {
            rng.next_rand();
        }
        rng
    }

    /// Equivalent of `rand()`. Always in `0..2^31`.
    pub fn next_rand(&mut self) -> u32 {
        let val = self.state[self.front].wrapping_add(self.state[self.rear]);
        self.state[self.front] = val;
        self.front = (self.front + 1) % DEG;
        self.rear = (self.rear + 1) % DEG;
        val >> 1
    }
}

impl RngCore for GlibcRand {
    /// One `rand()` output, the top bit is always clear.
    fn next_u32(&mut self) -> u32 {
        self.next_rand()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for GlibcRand {
    type Seed = [u8; 4];

    fn from_seed(seed: [u8; 4]) -> Self {
        GlibcRand::new(u32::from_le_bytes(seed))
    }

    /// Truncates to the low 32 bits like the conversion to `unsigned int`.
    fn seed_from_u64(seed: u64) -> Self {
        GlibcRand::new(seed as u32)
    }
}
