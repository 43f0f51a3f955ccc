use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// The two lookup tables sharing the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    Crew,
    Type,
}

impl ReferenceKind {
    pub fn table(&self) -> &'static str {
        match self {
            ReferenceKind::Crew => "crews",
            ReferenceKind::Type => "types",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReferenceKind::Crew => "Crew",
            ReferenceKind::Type => "Type",
        }
    }

    /// Rows seeded into an empty table.
    pub fn defaults(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ReferenceKind::Crew => &[("AJS1", "#3B82F6"), ("AJS2", "#EF4444")],
            ReferenceKind::Type => &[("ROCK", "#9CA3AF"), ("NO ROCK", "#10B981")],
        }
    }
}

/// A named, coloured crew or work type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: Option<i64>,
    pub name: String,
    pub color: String,
    pub created_at: Option<String>,
}

fn color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static color regex"))
}

/// Colours are stored as `#RRGGBB`, upper-cased.
pub fn normalize_color(raw: &str) -> AppResult<String> {
    let c = raw.trim();
    if !color_regex().is_match(c) {
        return Err(AppError::InvalidColor(raw.to_string()));
    }
    Ok(c.to_uppercase())
}

pub fn normalize_name(kind: ReferenceKind, raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::InvalidName(format!(
            "{} name must not be empty",
            kind.label()
        )));
    }
    Ok(name.to_string())
}
