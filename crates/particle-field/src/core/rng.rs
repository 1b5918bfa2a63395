/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic and cheap; each field owns one.
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

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound). Returns 0 for an empty bound.
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [-0.5, 0.5).
    pub fn centered(&mut self) -> f32 {
        self.next_f32() - 0.5
    }
}
