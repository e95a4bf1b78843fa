//! MINSTD Lehmer generator
//!
//! A multiplicative linear-congruential stream: `state = 48271 * state mod (2^31 - 1)`.
//! Every derived draw (`float`, `int`, `bool`, `pick`, `shuffle`) is built on
//! `next()`, so two streams with the same seed agree draw for draw.
//!
//! A `Prng` is a plain value with a single owner. Concurrent callers each get
//! their own stream; there is no interior mutability and no global instance.

use rand::RngCore;

/// MINSTD multiplier
pub const MULTIPLIER: u64 = 48271;

/// MINSTD modulus (2^31 - 1)
pub const MODULUS: u64 = 2_147_483_647;

/// Seeded deterministic random stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prng {
    seed: u64,
    state: u64,
}

impl Prng {
    /// Create a stream from a seed
    ///
    /// The seed is reduced modulo 2^31 - 1. Zero is an absorbing state for a
    /// Lehmer generator, so a seed reducing to zero starts from 1 instead.
    pub fn new(seed: u64) -> Self {
        let seed = match seed % MODULUS {
            0 => 1,
            s => s,
        };
        Self { seed, state: seed }
    }

    /// Normalized seed this stream was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current raw state
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advance the stream and return a value in [0, 1)
    pub fn next(&mut self) -> f64 {
        self.state = (MULTIPLIER * self.state) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Value in [min, max)
    pub fn float(&mut self, min: f64, max: f64) -> f64 {
        min + self.next() * (max - min)
    }

    /// Integer in [min, max], inclusive at both ends
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        self.float(min as f64, (max + 1) as f64).floor() as i64
    }

    /// True with probability `p`
    pub fn bool(&mut self, p: f64) -> bool {
        self.next() < p
    }

    /// Uniformly chosen element, `None` for an empty slice
    ///
    /// An empty slice consumes no draw.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.int(0, items.len() as i64 - 1) as usize;
        items.get(index)
    }

    /// Fisher-Yates shuffle into a new vector; the input is untouched
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut shuffled = items.to_vec();
        for i in (1..shuffled.len()).rev() {
            let j = self.int(0, i as i64) as usize;
            shuffled.swap(i, j);
        }
        shuffled
    }

    /// Restore the stream to its seed so the same sequence replays
    pub fn reset(&mut self) {
        self.state = self.seed;
    }
}

/// Lets a `Prng` drive `rand` distributions and helpers.
///
/// Each `u32` is built from one `next()` draw, so mixing these calls with the
/// native draws keeps the stream deterministic.
impl RngCore for Prng {
    fn next_u32(&mut self) -> u32 {
        (self.next() * 4_294_967_296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
