//! Seeded random source.
//!
//! [`Alea`] is Johannes Baagøe's floating-point generator. Its stream is
//! defined entirely by IEEE-754 double arithmetic, so any implementation
//! seeded with the same string produces the same draws. A [`GameLog`] can
//! therefore be replayed by an independent verifier.
//!
//! [`GameLog`]: crate::GameLog

use tracing::trace;

const TWO_POW_32: f64 = 4_294_967_296.0;
const TWO_POW_NEG_32: f64 = 2.328_306_436_538_696_3e-10;

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Returns the next draw.
    fn next_f64(&mut self) -> f64;

    /// Draws a uniform integer from the inclusive range, consuming exactly
    /// one draw. Reversed bounds are swapped.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let span = (hi - lo + 1) as f64;
        lo + (self.next_f64() * span).floor() as i64
    }
}

/// String hash used to derive the generator state from a seed.
struct Mash {
    n: f64,
}

impl Mash {
    const fn new() -> Self {
        Self {
            n: 4_022_871_197.0, // 0xefc8249d
        }
    }

    fn mash(&mut self, data: &str) -> f64 {
        let mut n = self.n;
        for unit in data.encode_utf16() {
            n += f64::from(unit);
            let mut h = 0.025_196_032_824_169_38 * n;
            n = wrap_u32(h);
            h -= n;
            h *= n;
            n = wrap_u32(h);
            h -= n;
            n += h * TWO_POW_32;
        }
        self.n = n;
        wrap_u32(n) * TWO_POW_NEG_32
    }
}

/// Truncates a non-negative double and reduces it modulo 2^32.
fn wrap_u32(value: f64) -> f64 {
    f64::from(value as u64 as u32)
}

/// Alea generator with a draw counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Alea {
    s0: f64,
    s1: f64,
    s2: f64,
    c: f64,
    draws: u64,
}

impl Alea {
    /// Seeds a generator from a string.
    #[must_use]
    pub fn new(seed: &str) -> Self {
        let mut mash = Mash::new();
        let mut s0 = mash.mash(" ");
        let mut s1 = mash.mash(" ");
        let mut s2 = mash.mash(" ");

        s0 -= mash.mash(seed);
        if s0 < 0.0 {
            s0 += 1.0;
        }
        s1 -= mash.mash(seed);
        if s1 < 0.0 {
            s1 += 1.0;
        }
        s2 -= mash.mash(seed);
        if s2 < 0.0 {
            s2 += 1.0;
        }

        Self {
            s0,
            s1,
            s2,
            c: 1.0,
            draws: 0,
        }
    }

    /// Seeds a generator and advances it past `draws` draws.
    #[must_use]
    pub fn resume(seed: &str, draws: u64) -> Self {
        let mut rng = Self::new(seed);
        for _ in 0..draws {
            rng.step();
        }
        rng
    }

    /// Number of draws consumed since seeding.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    fn step(&mut self) -> f64 {
        let t = 2_091_639.0 * self.s0 + self.c * TWO_POW_NEG_32;
        self.s0 = self.s1;
        self.s1 = self.s2;
        self.c = t.trunc();
        self.s2 = t - self.c;
        self.draws += 1;
        self.s2
    }
}

impl Default for Alea {
    fn default() -> Self {
        Self::new("")
    }
}

impl RandomSource for Alea {
    fn next_f64(&mut self) -> f64 {
        let draw = self.step();
        trace!(draw, index = self.draws, "alea draw");
        draw
    }
}
