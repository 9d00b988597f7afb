//! Seeded xorshift64* stream behind shake jitter, random starts and vertex selection.

/// Weight of one step of a 53-bit mantissa.
const UNIT: f64 = 1.0 / (1u64 << 53) as f64;

#[derive(Debug, Clone)]
pub(crate) struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    /// A zero seed would stall the generator, so it is bumped to 1.
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn advance(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.advance() >> 11) as f64 * UNIT
    }

    /// `[-1, 1)`.
    pub(crate) fn symmetric(&mut self) -> f64 {
        2.0 * self.unit() - 1.0
    }

    pub(crate) fn index_below(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        ((self.unit() * upper as f64) as usize).min(upper - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::XorShift64Star;

    #[test]
    fn seeded_sequence_is_stable() {
        let mut rng = XorShift64Star::new(1);
        let expected = [0.28083505005035947, 0.6711372530266764, 0.7258461452833668];
        for (i, &e) in expected.iter().enumerate() {
            let v = rng.unit();
            assert!((v - e).abs() < 1e-15, "value {i}: got {v}, expected {e}");
        }
    }

    #[test]
    fn zero_seed_behaves_like_seed_one() {
        let mut a = XorShift64Star::new(0);
        let mut b = XorShift64Star::new(1);
        for _ in 0..4 {
            assert_eq!(a.symmetric(), b.symmetric());
        }
    }

    #[test]
    fn indices_stay_below_the_bound() {
        let mut rng = XorShift64Star::new(7);
        for upper in 0..20 {
            for _ in 0..50 {
                assert!(rng.index_below(upper) < upper.max(1));
            }
        }
    }
}
