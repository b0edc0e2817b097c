use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Derives independent deterministic streams from one seed, one per generation phase.
#[derive(Clone, Copy, Debug)]
pub struct RngSeq {
    base: u64,
}

impl RngSeq {
    pub const NOISE: u64 = 0;
    pub const RIVERS: u64 = 1;

    pub fn new(seed: u64) -> Self {
        Self { base: seed }
    }

    pub fn seed_for(&self, phase: u64) -> u64 {
        self.base ^ phase.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    pub fn for_phase(&self, phase: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed_for(phase))
    }
}
