pub mod history;
pub mod roles;
pub mod start;
pub mod stats;

use std::path::Path;

use anyhow::Result;

use prepdeck_core::bank::QuestionBank;

/// Resolve the question bank: an explicit `--bank` flag wins, then the
/// config's bank path, then the built-in bank.
pub fn resolve_bank(
    flag: Option<&Path>,
    config_bank: Option<&Path>,
) -> Result<std::borrow::Cow<'static, QuestionBank>> {
    use std::borrow::Cow;
    match flag.or(config_bank) {
        Some(path) => Ok(Cow::Owned(QuestionBank::from_path(path)?)),
        None => Ok(Cow::Borrowed(QuestionBank::builtin())),
    }
}
