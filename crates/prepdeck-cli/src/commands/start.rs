//! The `prepdeck start` command: an interactive interview session.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use prepdeck_core::scoring::{score_session, ThreadRngSource};
use prepdeck_core::session::{Advance, Session, MIN_ANSWER_LEN};
use prepdeck_core::result::InterviewResult;
use prepdeck_core::error::SessionError;
use prepdeck_store::{DraftStore, HistoryStore};

use crate::config;

pub async fn execute(
    role: Option<String>,
    difficulty: Option<String>,
    bank: Option<PathBuf>,
    resume: bool,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let cfg = config::load_config_from(config_path.as_deref())?;
    let bank = super::resolve_bank(bank.as_deref(), cfg.bank.as_deref())?;
    let role = role.unwrap_or(cfg.default_role);
    let difficulty = difficulty.unwrap_or(cfg.default_difficulty);
    let data_dir = data_dir.unwrap_or(cfg.data_dir);
    let store = HistoryStore::new(&data_dir);
    let drafts = DraftStore::new(&data_dir);

    let mut session = if resume {
        let Some(draft) = drafts.load().await? else {
            anyhow::bail!("no saved draft to resume");
        };
        let session = Session::resume(&bank, draft)?;
        println!(
            "Resuming '{}' interview at question {}/{}.",
            session.job_role(),
            session.current_index() + 1,
            session.questions().len()
        );
        session
    } else {
        if bank.get(&role).is_none() {
            let (used, _) = bank.resolve(&role);
            println!("Unknown role '{role}', using the {used} questions.");
        }
        let session = Session::new(&bank, &role, &difficulty);
        println!(
            "Starting interview for '{}' ({}, {} questions).",
            session.job_role(),
            session.difficulty(),
            session.questions().len()
        );
        session
    };
    println!("Type your answer, then :next to continue. :hint :prev :clear :save :submit :quit");
    println!();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    show_question(&session);

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            // stdin closed: treat like :quit
            None => {
                session.abort();
                println!("\nSession aborted, nothing saved.");
                return Ok(());
            }
        };

        match line.trim() {
            ":hint" => {
                let hint = &session.current_question().hint;
                if hint.is_empty() {
                    println!("No hint for this question.");
                } else {
                    println!("Hint: {hint}");
                }
            }
            ":prev" => {
                if session.previous() {
                    show_question(&session);
                } else {
                    println!("Already at the first question.");
                }
            }
            ":next" => match session.next() {
                Ok(Advance::Moved) => show_question(&session),
                Ok(Advance::ReadyToSubmit) => {
                    println!("This is the last question. :submit to finish, :prev to review.");
                }
                Err(e) => print_gate_error(e),
            },
            ":submit" => {
                if session.current_index() + 1 < session.questions().len() {
                    println!("Answer the remaining questions first (:next to continue).");
                    continue;
                }
                match session.next() {
                    Ok(Advance::ReadyToSubmit) | Ok(Advance::Moved) => {}
                    Err(e) => {
                        print_gate_error(e);
                        continue;
                    }
                }
                let completed = session.finish();
                let mut rng = ThreadRngSource;
                let result = score_session(&completed, &mut rng);
                print_result(&result);
                // Scoring already happened; a persistence failure must not
                // eat the result the user is looking at.
                if let Err(e) = store.append(&result).await {
                    tracing::warn!(error = %format!("{e:#}"), "failed to save result");
                    eprintln!("Warning: result could not be saved: {e:#}");
                } else {
                    println!("Saved to history as {}.", result.id);
                }
                if let Err(e) = drafts.clear().await {
                    tracing::warn!(error = %format!("{e:#}"), "failed to clear draft");
                }
                return Ok(());
            }
            ":save" => {
                let draft = session.to_draft();
                session.abort();
                drafts.save(&draft).await?;
                println!("Draft saved. Resume with: prepdeck start --resume");
                return Ok(());
            }
            ":clear" => {
                session.set_answer("");
                println!("Answer cleared.");
            }
            ":quit" => {
                session.abort();
                println!("Session aborted, nothing saved.");
                return Ok(());
            }
            "" => {}
            answer => {
                let text = if session.current_answer().is_empty() {
                    answer.to_string()
                } else {
                    format!("{}\n{}", session.current_answer(), answer)
                };
                session.set_answer(text);
            }
        }
    }
}

fn show_question(session: &Session) {
    let q = session.current_question();
    println!(
        "Question {}/{} [{}]",
        session.current_index() + 1,
        session.questions().len(),
        q.kind
    );
    println!("{}", q.question);
    if !session.current_answer().is_empty() {
        println!("(current answer: {} chars)", session.current_answer().chars().count());
    }
}

fn print_gate_error(e: SessionError) {
    match e {
        SessionError::AnswerTooShort { len, .. } => println!(
            "Answer too short ({len} chars, need at least {MIN_ANSWER_LEN}). Keep going."
        ),
        other => println!("{other}"),
    }
}

fn print_result(result: &InterviewResult) {
    use comfy_table::{Cell, Table};

    println!();
    println!(
        "Overall: {:.1}/{:.0} — {} (percentile {})",
        result.total_score, result.max_score, result.performance_level(), result.percentile
    );
    println!(
        "Answered {}/{} questions in {}s ({}% complete).",
        result.answered_questions,
        result.total_questions,
        result.duration_secs,
        result.completion_rate
    );

    let mut table = Table::new();
    table.set_header(vec!["#", "Score", "Feedback"]);
    for qs in &result.question_scores {
        table.add_row(vec![
            Cell::new(qs.question_id + 1),
            Cell::new(format!("{:.1}", qs.score)),
            Cell::new(&qs.feedback),
        ]);
    }
    println!("\n{table}");

    println!("\n{}", result.overall_feedback);
    if !result.strengths.is_empty() {
        println!("\nStrengths:");
        for s in &result.strengths {
            println!("  - {s}");
        }
    }
    if !result.improvement_areas.is_empty() {
        println!("\nAreas to improve:");
        for s in &result.improvement_areas {
            println!("  - {s}");
        }
    }
}
