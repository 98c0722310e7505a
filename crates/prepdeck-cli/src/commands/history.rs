//! The `prepdeck history` subcommands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::config;

pub async fn list(data_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    use comfy_table::{Cell, Table};

    let store = config::history_store(data_dir, config_path.as_deref())?;
    let results = store.list().await;

    if results.is_empty() {
        println!("No interviews recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Date", "Role", "Score", "Level"]);
    for r in &results {
        table.add_row(vec![
            Cell::new(r.id),
            Cell::new(r.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&r.job_role),
            Cell::new(format!("{:.1}", r.total_score)),
            Cell::new(r.performance_level()),
        ]);
    }
    println!("{table}");
    println!("{} interview(s).", results.len());
    Ok(())
}

pub async fn show(id: &str, data_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let store = config::history_store(data_dir, config_path.as_deref())?;
    let id = parse_id(id)?;

    let Some(result) = store.get(id).await else {
        anyhow::bail!("no result with id {id}");
    };

    println!("{} — {} ({})", result.id, result.job_role, result.difficulty);
    println!("Taken: {}", result.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!(
        "Score: {:.1}/{:.0} — {} (percentile {})",
        result.total_score,
        result.max_score,
        result.performance_level(),
        result.percentile
    );
    println!(
        "Answered {}/{} questions in {}s.",
        result.answered_questions, result.total_questions, result.duration_secs
    );
    println!();
    for qs in &result.question_scores {
        println!("  Q{}: {:.1} — {}", qs.question_id + 1, qs.score, qs.feedback);
    }
    println!("\n{}", result.overall_feedback);
    Ok(())
}

pub async fn delete(
    id: &str,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let store = config::history_store(data_dir, config_path.as_deref())?;
    let id = parse_id(id)?;

    if store.delete(id).await? {
        println!("Deleted {id}.");
        Ok(())
    } else {
        anyhow::bail!("no result with id {id}");
    }
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).with_context(|| format!("invalid result id: '{id}'"))
}
