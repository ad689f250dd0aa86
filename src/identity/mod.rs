//! # Seller Identity
//!
//! Seller ids group ads on the service side, so every scenario draws a fresh
//! one to keep "ads by seller" lookups free of data left by other scenarios
//! or earlier runs.

use std::collections::HashSet;
use std::fmt::{self, Display};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const SELLER_ID_MIN: u32 = 111_111;
pub const SELLER_ID_MAX: u32 = 999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SellerId(u32);

impl SellerId {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for SellerId {
    fn from(value: u32) -> Self {
        SellerId(value)
    }
}

impl Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Uniform seller-id source that never hands out the same id twice.
///
/// Always seeded: either with the configured seed or with one drawn from OS
/// entropy, which is kept so the run can be replayed.
#[derive(Debug, Clone)]
pub struct SellerIdGenerator {
    rng: StdRng,
    seed: u64,
    issued: HashSet<SellerId>,
}

impl SellerIdGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            issued: HashSet::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws until it hits an id not issued by this generator yet.
    pub fn next_id(&mut self) -> SellerId {
        // Whole range used up: start over rather than spin forever.
        if self.issued.len() == (SELLER_ID_MAX - SELLER_ID_MIN + 1) as usize {
            self.issued.clear();
        }
        loop {
            let id = SellerId(self.rng.gen_range(SELLER_ID_MIN..=SELLER_ID_MAX));
            if self.issued.insert(id) {
                return id;
            }
        }
    }
}
