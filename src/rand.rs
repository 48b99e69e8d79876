// Permuted congruential generator, carried over bit-for-bit from the
// original design so that a serialized seed reproduces an identical
// training trace (see `binary_machine`/`multiclass` P6).
//
// https://en.wikipedia.org/wiki/Permuted_congruential_generator

const MULTIPLIER: u64 = 6364136223846793005;
const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
}
impl Pcg32 {
    /// Construct a generator already warmed up from `seed`, matching
    /// `fastsrand`: `state = 2*seed + 1`, then discard one draw.
    pub fn new(seed: u64) -> Pcg32 {
        let mut r = Pcg32 { state: 2u64.wrapping_mul(seed).wrapping_add(1) };
        r.next_u32();
        r
    }

    /// Restore a generator from a previously saved raw state (checkpoint
    /// deserialization). Unlike `new`, does not perturb the state.
    pub fn from_raw_state(state: u64) -> Pcg32 {
        Pcg32 { state }
    }

    pub fn raw_state(&self) -> u64 {
        self.state
    }

    pub fn next_u32(&mut self) -> u32 {
        let x = self.state;
        self.state = self.state.wrapping_mul(MULTIPLIER);
        (((x ^ (x >> 22)) >> (22 + (x >> 61))) & 0xFFFF_FFFF) as u32
    }

    /// Uniform double in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Biased uniform integer in `[0, n)`. Exact for `n` a power of two;
    /// slightly favors the low end of the range otherwise (accepted per
    /// the original design).
    pub fn uniform_below(&mut self, n: u32) -> u32 {
        ((n as u64).wrapping_mul(self.next_u32() as u64) >> 32) as u32
    }

    /// Box-Muller normal sample with the given mean and variance.
    pub fn normal(&mut self, mean: f64, variance: f64) -> f64 {
        let u1 = self.uniform();
        let u2 = self.uniform();
        mean + (-2.0 * u1.ln() * variance).sqrt() * (TWO_PI * u2).sin()
    }

    /// Normal-approximated binomial(p, n), clamped to `[0, n]`.
    pub fn binomial(&mut self, p: f64, n: u32) -> u32 {
        let nf = n as f64;
        let b = self.normal(nf * p, nf * p * (1.0 - p)) + 0.5;
        if b <= 0.0 {
            0
        } else if b >= nf {
            n
        } else {
            b as u32
        }
    }

    /// Fisher-Yates shuffle of a full index permutation.
    pub fn shuffle(&mut self, a: &mut [u32]) {
        let mut i = a.len();
        while i > 0 {
            let j = self.uniform_below(i as u32) as usize;
            a.swap(i - 1, j);
            i -= 1;
        }
    }

    /// Partial Fisher-Yates: picks `count` distinct indices from `[0, n)`
    /// without materializing the full permutation, used to draw the
    /// validation subsample (§4.11).
    pub fn sample_indices(&mut self, n: usize, count: usize) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..n).collect();
        let mut picked = Vec::with_capacity(count);
        for i in 0..count {
            let j = i + self.uniform_below((n - i) as u32) as usize;
            idx.swap(i, j);
            picked.push(idx[i]);
        }
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_is_deterministic() {
        let mut a = Pcg32::new(1);
        let mut b = Pcg32::new(1);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Pcg32::new(1);
        let mut b = Pcg32::new(2);
        let seq_a: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let seq_b: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn uniform_is_within_unit_interval() {
        let mut r = Pcg32::new(42);
        for _ in 0..1000 {
            let u = r.uniform();
            assert!(u >= 0.0 && u < 1.0);
        }
    }

    #[test]
    fn uniform_below_respects_bound() {
        let mut r = Pcg32::new(7);
        for _ in 0..1000 {
            assert!(r.uniform_below(5) < 5);
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut r = Pcg32::new(3);
        let mut a: Vec<u32> = (0..20).collect();
        r.shuffle(&mut a);
        let mut sorted = a.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn raw_state_round_trips() {
        let mut r = Pcg32::new(99);
        r.next_u32();
        r.next_u32();
        let saved = r.raw_state();
        let mut restored = Pcg32::from_raw_state(saved);
        assert_eq!(r.next_u32(), restored.next_u32());
    }
}
