//! Zone identifier generation.
//!
//! Identifiers are scoped to one design session. Every generator checks its
//! candidate against the zones already present, so imported designs with
//! arbitrary ids never collide with freshly created ones.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::mission::{Zone, ZoneId};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_ID_LEN: usize = 9;

pub trait ZoneIdGenerator: Send {
    fn next_id(&mut self, existing: &[Zone]) -> ZoneId;
}

fn is_taken(existing: &[Zone], candidate: &str) -> bool {
    existing.iter().any(|zone| zone.id.as_str() == candidate)
}

/// Monotonic `zone-N` counter.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ZoneIdGenerator for SequentialIds {
    fn next_id(&mut self, existing: &[Zone]) -> ZoneId {
        loop {
            self.counter += 1;
            let candidate = format!("zone-{}", self.counter);
            if !is_taken(existing, &candidate) {
                return ZoneId::new(candidate);
            }
        }
    }
}

/// Seeded 9-character base-36 ids, redrawn on collision.
pub struct RandomIds {
    rng: ChaCha8Rng,
}

impl RandomIds {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn draw(&mut self) -> String {
        (0..RANDOM_ID_LEN)
            .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
            .collect()
    }
}

impl ZoneIdGenerator for RandomIds {
    fn next_id(&mut self, existing: &[Zone]) -> ZoneId {
        loop {
            let candidate = self.draw();
            if !is_taken(existing, &candidate) {
                return ZoneId::new(candidate);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Sequential,
    Random,
}

impl IdStrategy {
    pub fn build(self, seed: u64) -> Box<dyn ZoneIdGenerator> {
        match self {
            IdStrategy::Sequential => Box::new(SequentialIds::new()),
            IdStrategy::Random => Box::new(RandomIds::new(seed)),
        }
    }
}
