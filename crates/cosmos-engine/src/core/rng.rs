//! Random sources for generation and cosmetic drawing.
//!
//! Everything that rolls dice takes a `&mut impl RandomSource`, so tests can
//! swap the session generator for a [`SequenceRng`] and get repeatable output.

/// A uniform random source in `[0, 1)`.
pub trait RandomSource {
    /// Next sample in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Generate a random number in `[0, upper_bound)`. Zero bound yields zero.
    fn next_int(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        ((self.next_f32() * upper_bound as f32) as u32).min(upper_bound - 1)
    }

    /// Uniform float in `[min, max)`.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform integer in `[min, max]`.
    fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        min + self.next_int((max - min + 1) as u32) as i32
    }

    /// True when the next sample lands above `1 - p`.
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() > 1.0 - p
    }

    /// Pick one element. `items` must not be empty.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T
    where
        Self: Sized,
    {
        &items[self.next_int(items.len() as u32) as usize]
    }
}

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic, fast, no-std compatible.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RandomSource for Rng {
    fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }
}

/// Replays a fixed list of samples in a loop.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRng {
    /// Samples outside `[0, 1)` are clamped into range. An empty list behaves like `[0.0]`.
    pub fn new(values: Vec<f32>) -> Self {
        let values = if values.is_empty() {
            vec![0.0]
        } else {
            values
                .into_iter()
                .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
                .collect()
        };
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRng {
    fn next_f32(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        v
    }
}
