//! TOML question bank parser and role lookup.
//!
//! A bank maps role identifiers to fixed, ordered question lists. The
//! built-in bank is embedded at compile time; custom banks load from TOML
//! files with the same shape.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{normalize_role, Question, QuestionType};

/// Role every unknown identifier falls back to.
pub const FALLBACK_ROLE: &str = "software-engineer";

const BUILTIN_BANK: &str = include_str!("../banks/builtin.toml");

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    #[serde(default)]
    roles: Vec<TomlRole>,
}

#[derive(Debug, Deserialize)]
struct TomlRole {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    question: String,
    #[serde(default)]
    hint: String,
    #[serde(rename = "type")]
    kind: String,
}

/// A role entry in the bank: its display title plus the question list.
#[derive(Debug, Clone)]
pub struct RoleEntry {
    pub title: String,
    pub questions: Vec<Question>,
}

/// Static role-to-questions mapping, read-only at runtime.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    roles: BTreeMap<String, RoleEntry>,
}

impl QuestionBank {
    /// The bank embedded in the binary.
    ///
    /// Parsed once; the embedded TOML is validated by tests, so a parse
    /// failure here is a build defect, not a runtime condition.
    pub fn builtin() -> &'static QuestionBank {
        static BANK: OnceLock<QuestionBank> = OnceLock::new();
        BANK.get_or_init(|| {
            QuestionBank::parse_str(BUILTIN_BANK, Path::new("banks/builtin.toml"))
                .unwrap_or_else(|e| panic!("embedded question bank is invalid: {e:#}"))
        })
    }

    /// Load a bank from a TOML file.
    pub fn from_path(path: &Path) -> Result<QuestionBank> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read question bank: {}", path.display()))?;
        Self::parse_str(&content, path)
    }

    /// Parse a TOML string into a bank (useful for testing).
    pub fn parse_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
        let parsed: TomlBankFile = toml::from_str(content)
            .with_context(|| format!("failed to parse question bank: {}", source_path.display()))?;

        anyhow::ensure!(
            !parsed.roles.is_empty(),
            "question bank has no roles: {}",
            source_path.display()
        );

        let mut roles = BTreeMap::new();
        for role in parsed.roles {
            let id = normalize_role(&role.id);
            anyhow::ensure!(!id.is_empty(), "role with empty id in bank");
            anyhow::ensure!(
                !role.questions.is_empty(),
                "role '{id}' has no questions"
            );
            let questions = role
                .questions
                .into_iter()
                .map(|q| {
                    let kind: QuestionType = q
                        .kind
                        .parse()
                        .map_err(|e: String| anyhow::anyhow!("role '{id}': {e}"))?;
                    Ok(Question {
                        question: q.question,
                        hint: q.hint,
                        kind,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let title = if role.title.is_empty() {
                id.clone()
            } else {
                role.title
            };
            roles.insert(id, RoleEntry { title, questions });
        }

        Ok(QuestionBank { roles })
    }

    /// Role identifiers in the bank, sorted.
    pub fn roles(&self) -> impl Iterator<Item = (&str, &RoleEntry)> {
        self.roles.iter().map(|(id, e)| (id.as_str(), e))
    }

    /// Questions for a role, without fallback.
    pub fn get(&self, role: &str) -> Option<&RoleEntry> {
        self.roles.get(&normalize_role(role))
    }

    /// Questions for a role, falling back to [`FALLBACK_ROLE`] when the role
    /// has no entry. A custom bank that lacks the fallback role falls back
    /// to its first role instead, so the result is never empty: parsing
    /// guarantees every bank holds at least one role with at least one
    /// question.
    pub fn questions_for(&self, role: &str) -> &[Question] {
        &self.resolve(role).1.questions
    }

    /// Resolve a role through the fallback chain, returning the id of the
    /// entry actually used alongside the entry.
    pub fn resolve(&self, role: &str) -> (&str, &RoleEntry) {
        let normalized = normalize_role(role);
        if let Some((id, entry)) = self.roles.get_key_value(&normalized) {
            return (id, entry);
        }
        if let Some((id, entry)) = self.roles.get_key_value(FALLBACK_ROLE) {
            tracing::warn!("unknown role '{normalized}', falling back to {FALLBACK_ROLE}");
            return (id, entry);
        }
        let (id, entry) = self
            .roles
            .iter()
            .next()
            .unwrap_or_else(|| unreachable!("parsing rejects banks with no roles"));
        tracing::warn!("unknown role '{normalized}' and bank has no {FALLBACK_ROLE}, using '{id}'");
        (id, entry)
    }
}
