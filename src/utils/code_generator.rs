//! Short code generation.
//!
//! Codes are drawn from a non-cryptographic RNG. Uniqueness is enforced by the
//! allocator against the store, not by the generator.

use rand::Rng;

/// Base-36 alphabet: digits followed by lowercase ASCII letters.
pub const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Default number of characters in a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Produces candidate short codes.
///
/// The allocator treats the output as opaque and handles collisions the same
/// way for every implementation.
pub trait CodeGenerator: Send + Sync {
    /// Generates one candidate code.
    fn generate(&self) -> String;
}

/// Generates fixed-length codes with characters drawn uniformly from
/// [`BASE36_ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let generator = RandomCodeGenerator::new(6);
/// let code = generator.generate();
/// assert_eq!(code.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| BASE36_ALPHABET[rng.random_range(0..BASE36_ALPHABET.len())] as char)
            .collect()
    }
}
