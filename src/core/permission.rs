//! Who may change which entry.

use crate::core::date::from_storage_string;
use crate::models::{Entry, Identity};
use chrono::{Days, NaiveDate};

pub const EDIT_WINDOW_DAYS: u32 = 30;

/// Rolling window inside which supervisors may still modify their entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditPolicy {
    pub window_days: u32,
}

impl Default for EditPolicy {
    fn default() -> Self {
        Self {
            window_days: EDIT_WINDOW_DAYS,
        }
    }
}

impl EditPolicy {
    pub fn new(window_days: u32) -> Self {
        Self { window_days }
    }

    /// Oldest entry date a supervisor may still touch (inclusive).
    pub fn cutoff(&self, today: NaiveDate) -> NaiveDate {
        today - Days::new(u64::from(self.window_days))
    }

    /// Admins may edit anything. Supervisors only their own entries dated
    /// on or after the cutoff; an unparseable date is never editable.
    pub fn can_edit(&self, entry: &Entry, actor: &Identity, today: NaiveDate) -> bool {
        match actor {
            Identity::Admin { .. } => true,
            Identity::Supervisor { username, .. } => {
                if entry.username.is_empty() || entry.username != *username {
                    return false;
                }
                match from_storage_string(&entry.date) {
                    Some(d) => d >= self.cutoff(today),
                    None => false,
                }
            }
        }
    }
}

/// [`EditPolicy::can_edit`] with the default 30 day window.
pub fn can_edit(entry: &Entry, actor: &Identity, today: NaiveDate) -> bool {
    EditPolicy::default().can_edit(entry, actor, today)
}

/// Entries the actor is allowed to see: everything for admins, only their
/// own rows for supervisors.
pub fn visible_entries(entries: &[Entry], actor: &Identity) -> Vec<Entry> {
    match actor {
        Identity::Admin { .. } => entries.to_vec(),
        Identity::Supervisor { username, .. } => entries
            .iter()
            .filter(|e| e.username == *username)
            .cloned()
            .collect(),
    }
}
