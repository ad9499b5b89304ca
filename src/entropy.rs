//! Sources of deployment nonces
//!
//! Each module slot draws one 256-bit nonce when it is created. Production
//! plans draw from the OS; tests use a seeded generator so plans are
//! reproducible.

use alloy::primitives::U256;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// Supplies the salt nonce of each module deployment
pub trait NonceSource {
    fn next_nonce(&mut self) -> U256;
}

/// Cryptographically secure nonces from the operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl NonceSource for OsEntropy {
    fn next_nonce(&mut self) -> U256 {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        U256::from_be_bytes(bytes)
    }
}

/// Deterministic nonces for reproducible plans
#[derive(Debug, Clone)]
pub struct SeededEntropy {
    rng: StdRng,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NonceSource for SeededEntropy {
    fn next_nonce(&mut self) -> U256 {
        let mut bytes = [0u8; 32];
        self.rng.fill_bytes(&mut bytes);
        U256::from_be_bytes(bytes)
    }
}

impl<T: NonceSource + ?Sized> NonceSource for &mut T {
    fn next_nonce(&mut self) -> U256 {
        (**self).next_nonce()
    }
}
