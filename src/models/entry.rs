use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// One recorded production measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Option<i64>,
    pub date: String,     // ⇔ entries.date (TEXT "YYYY/MM/DD", legacy "YYYY-MM-DD")
    pub crew: String,     // ⇔ entries.crew
    pub feet: u32,        // ⇔ entries.feet (INTEGER > 0)
    #[serde(rename = "type")]
    pub kind: String,     // ⇔ entries.type
    pub username: String, // ⇔ entries.username (owner)
    pub created_at: Option<String>,
}

impl Entry {
    /// Build a not-yet-persisted entry.
    pub fn new(
        date: impl Into<String>,
        crew: impl Into<String>,
        kind: impl Into<String>,
        feet: u32,
        username: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            date: date.into(),
            crew: crew.into(),
            feet,
            kind: kind.into(),
            username: username.into(),
            created_at: None,
        }
    }

    /// Check the field invariants that do not need the database.
    pub fn validate(&self) -> AppResult<()> {
        validate_feet(self.feet)?;
        if self.crew.trim().is_empty() {
            return Err(AppError::InvalidName("crew must not be empty".into()));
        }
        if self.kind.trim().is_empty() {
            return Err(AppError::InvalidName("type must not be empty".into()));
        }
        Ok(())
    }
}

/// Full-field replacement applied by an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryUpdate {
    pub date: String,
    pub crew: String,
    pub kind: String,
    pub feet: u32,
}

pub fn validate_feet(feet: u32) -> AppResult<()> {
    if feet == 0 {
        return Err(AppError::InvalidFeet(feet.to_string()));
    }
    Ok(())
}

/// Parse a feet value typed by a user.
pub fn parse_feet(raw: &str) -> AppResult<u32> {
    let feet: u32 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidFeet(raw.to_string()))?;
    validate_feet(feet)?;
    Ok(feet)
}
