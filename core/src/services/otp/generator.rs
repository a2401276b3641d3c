//! Fixed-width numeric code generation

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sn_shared::config::otp::SUPPORTED_CODE_LENGTHS;

use crate::errors::{DomainError, DomainResult};

/// Produces zero-padded decimal codes uniformly distributed over
/// `[0, 10^length)`.
///
/// The RNG is seeded once when the generator is built and shared by every
/// call; the service holds a single generator for the life of the process.
pub struct CodeGenerator {
    length: usize,
    upper_bound: u32,
    rng: Mutex<StdRng>,
}

impl CodeGenerator {
    /// Generator seeded from OS entropy
    pub fn new(length: usize) -> DomainResult<Self> {
        Self::with_rng(length, StdRng::from_entropy())
    }

    /// Deterministic generator for tests
    pub fn with_seed(length: usize, seed: u64) -> DomainResult<Self> {
        Self::with_rng(length, StdRng::seed_from_u64(seed))
    }

    fn with_rng(length: usize, rng: StdRng) -> DomainResult<Self> {
        if !SUPPORTED_CODE_LENGTHS.contains(&length) {
            return Err(DomainError::Validation {
                message: format!(
                    "Unsupported code length {}; expected one of {:?}",
                    length, SUPPORTED_CODE_LENGTHS
                ),
            });
        }
        Ok(Self {
            length,
            upper_bound: 10u32.pow(length as u32),
            rng: Mutex::new(rng),
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn generate(&self) -> String {
        let value = {
            // A poisoned lock still holds a usable RNG
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            rng.gen_range(0..self.upper_bound)
        };
        format!("{:0width$}", value, width = self.length)
    }
}

impl std::fmt::Debug for CodeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeGenerator")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_have_fixed_width_digits() {
        for length in [4, 6] {
            let generator = CodeGenerator::new(length).unwrap();
            for _ in 0..500 {
                let code = generator.generate();
                assert_eq!(code.len(), length);
                assert!(code.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }

    #[test]
    fn test_rejects_unsupported_length() {
        assert!(CodeGenerator::new(5).is_err());
        assert!(CodeGenerator::new(0).is_err());
    }

    #[test]
    fn test_seeded_generators_are_reproducible() {
        let a = CodeGenerator::with_seed(6, 42).unwrap();
        let b = CodeGenerator::with_seed(6, 42).unwrap();
        let first: Vec<String> = (0..5).map(|_| a.generate()).collect();
        let second: Vec<String> = (0..5).map(|_| b.generate()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_consecutive_codes_vary() {
        // One seed, many draws: the stream must not repeat one value
        let generator = CodeGenerator::with_seed(6, 7).unwrap();
        let codes: std::collections::HashSet<String> = (0..100).map(|_| generator.generate()).collect();
        assert!(codes.len() > 90);
    }

    #[test]
    fn test_leading_zeros_are_kept() {
        let generator = CodeGenerator::with_seed(4, 1).unwrap();
        let padded = (0..20_000)
            .map(|_| generator.generate())
            .any(|code| code.starts_with('0'));
        assert!(padded);
    }

    #[test]
    fn test_digit_distribution_is_roughly_uniform() {
        let generator = CodeGenerator::with_seed(4, 99).unwrap();
        let mut counts = [0usize; 10];
        for _ in 0..10_000 {
            let code = generator.generate();
            let first = code.as_bytes()[0] - b'0';
            counts[first as usize] += 1;
        }
        // Expect ~1000 per leading digit
        assert!(counts.iter().all(|&n| (800..1200).contains(&n)), "{counts:?}");
    }
}
