//! The `prepdeck roles` command.

use std::path::PathBuf;

use anyhow::Result;

use crate::config;

pub fn execute(bank: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    use comfy_table::{Cell, Table};

    let cfg = config::load_config_from(config_path.as_deref())?;
    let bank = super::resolve_bank(bank.as_deref(), cfg.bank.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec!["Role", "Title", "Questions"]);
    for (id, entry) in bank.roles() {
        table.add_row(vec![
            Cell::new(id),
            Cell::new(&entry.title),
            Cell::new(entry.questions.len()),
        ]);
    }

    println!("{table}");
    Ok(())
}
