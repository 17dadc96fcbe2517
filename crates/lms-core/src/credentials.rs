//! Random initial passwords for newly created accounts.
//!
//! Passwords are 12 characters drawn independently and uniformly from a fixed
//! 70-character alphabet.
//!
//! Characters are drawn from the operating system CSPRNG. Any caller-supplied
//! generator must also be a [`CryptoRng`].

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};

/// Length of every generated password.
pub const PASSWORD_LENGTH: usize = 12;

/// The 70 characters a generated password may contain.
pub const PASSWORD_ALPHABET: &[u8; 70] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Generates a password using the operating system random source.
pub fn generate_password() -> String {
    generate_password_with(&mut OsRng)
}

/// Generates a password from the given cryptographically secure generator.
pub fn generate_password_with<R>(rng: &mut R) -> String
where
    R: Rng + CryptoRng,
{
    (0..PASSWORD_LENGTH)
        .map(|_| PASSWORD_ALPHABET[rng.gen_range(0..PASSWORD_ALPHABET.len())] as char)
        .collect()
}
