use anyhow::Error;
use std::fmt;

/// Process exit codes used by the admin binaries.
pub mod exit_codes {
    /// Normal completion, operator cancellation, or interrupt.
    pub const SUCCESS: i32 = 0;
    /// Empty or malformed operator input.
    pub const INVALID_INPUT: i32 = 1;
    /// Anything that escaped the workflow's own error handling.
    pub const INTERNAL: i32 = 2;
}

/// An error paired with the exit code the process should terminate with.
#[derive(Debug)]
pub struct AppError {
    pub exit_code: i32,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(exit_code: i32, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            exit_code,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(exit_codes::INTERNAL, err)
    }

    pub fn invalid_input<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(exit_codes::INVALID_INPUT, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(exit_codes::INTERNAL, err)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
