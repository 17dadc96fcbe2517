#![allow(dead_code)]

use lms_cli::accounts::WorkflowOptions;
use std::path::Path;

/// bcrypt's minimum cost, so hashing stays fast in tests.
pub const TEST_COST: u32 = 4;

pub fn options(export_dir: &Path) -> WorkflowOptions {
    WorkflowOptions {
        bcrypt_cost: TEST_COST,
        export_dir: export_dir.to_path_buf(),
    }
}

/// Number of files in `dir`.
pub fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
