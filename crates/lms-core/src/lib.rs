//! # LMS Core
//!
//! Core errors and credential utilities shared by the LMS admin tools.
//!
//! - [`errors`]: Application error carrying a process exit code
//! - [`password`]: bcrypt password hashing and verification
//! - [`credentials`]: Random initial password generation
//! - [`names`]: Display-name derivation from email addresses
//!
//! # Example
//!
//! ```ignore
//! use lms_core::{derive_name, generate_password, hash_password, DEFAULT_COST};
//!
//! let name = derive_name("jane.doe@school.edu"); // "Jane Doe"
//! let password = generate_password();
//! let hash = hash_password(&password, DEFAULT_COST)?;
//! ```

pub mod credentials;
pub mod errors;
pub mod names;
pub mod password;

// Re-export commonly used items at crate root
pub use credentials::{PASSWORD_ALPHABET, PASSWORD_LENGTH, generate_password};
pub use errors::{AppError, exit_codes};
pub use names::derive_name;
pub use password::{DEFAULT_COST, PasswordError, hash_password, verify_password};
