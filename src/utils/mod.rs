//! Code generation and input validation helpers

pub mod base64_validator;

pub use base64_validator::{TextValidationError, validate_base64_text};

/// Characters a generated code may contain.
///
/// `I`, `O`, `i`, `l` and `o` are left out so codes survive being read aloud
/// or copied by hand.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz0123456789";

/// Length of every generated code
pub const CODE_LENGTH: usize = 6;

/// Longest code accepted from clients
pub const MAX_CODE_LENGTH: usize = 20;

/// Mint a new random code.
///
/// Every character is drawn uniformly from [`CODE_ALPHABET`] with rand's
/// thread-local generator, a ChaCha CSPRNG seeded and periodically reseeded
/// from the operating system. There is no weaker fallback: if the OS entropy
/// source cannot seed the generator, rand panics and the caller never gets a
/// code.
pub fn generate_code() -> String {
    generate_random_code(CODE_LENGTH)
}

pub fn generate_random_code(length: usize) -> String {
    std::iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Syntax check applied to client supplied codes before any store lookup:
/// 1 to 20 ASCII letters or digits.
#[inline]
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
