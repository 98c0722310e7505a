//! The `prepdeck stats` command.

use std::path::PathBuf;

use anyhow::Result;

use crate::config;

pub async fn execute(data_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    use comfy_table::{Cell, Table};

    let store = config::history_store(data_dir, config_path.as_deref())?;
    let stats = store.stats().await;

    if stats.total_interviews == 0 {
        println!("No interviews recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Interviews", "Average", "Best", "Improvement"]);
    table.add_row(vec![
        Cell::new(stats.total_interviews),
        Cell::new(format!("{:.1}", stats.average_score)),
        Cell::new(format!("{:.1}", stats.best_score)),
        Cell::new(format!("{:+.0}%", stats.improvement_rate)),
    ]);

    println!("{table}");
    Ok(())
}
