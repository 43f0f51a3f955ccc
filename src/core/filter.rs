//! Search / crew / type / date-range predicates over entry lists.

use crate::core::date::{normalize_storage_string, to_storage_string};
use crate::models::Entry;
use chrono::NaiveDate;

/// Value meaning "no restriction" for the crew and type selectors.
pub const ALL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub search: Option<String>,
    pub crew: Option<String>,
    pub kind: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn crew(mut self, crew: impl Into<String>) -> Self {
        self.crew = Some(crew.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Keep the entries matching every active predicate, in input order.
    pub fn apply(&self, entries: &[Entry]) -> Vec<Entry> {
        let active = self.active();
        entries
            .iter()
            .filter(|e| active.accepts(e))
            .cloned()
            .collect()
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        self.active().accepts(entry)
    }

    fn active(&self) -> ActiveFilter<'_> {
        ActiveFilter {
            needle: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase),
            crew: selector(self.crew.as_deref()),
            kind: selector(self.kind.as_deref()),
            from: self.date_from.map(to_storage_string),
            to: self.date_to.map(to_storage_string),
        }
    }
}

/// Predicates with the blank/`all` selectors already dropped.
struct ActiveFilter<'a> {
    needle: Option<String>,
    crew: Option<&'a str>,
    kind: Option<&'a str>,
    from: Option<String>,
    to: Option<String>,
}

impl ActiveFilter<'_> {
    fn accepts(&self, e: &Entry) -> bool {
        self.needle.as_deref().is_none_or(|n| matches_search(e, n))
            && self.crew.is_none_or(|c| e.crew == c)
            && self.kind.is_none_or(|k| e.kind == k)
            && in_range(e, self.from.as_deref(), self.to.as_deref())
    }
}

fn selector(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
}

fn matches_search(entry: &Entry, needle: &str) -> bool {
    entry.username.to_lowercase().contains(needle)
        || entry.crew.to_lowercase().contains(needle)
        || entry.kind.to_lowercase().contains(needle)
}

fn in_range(entry: &Entry, from: Option<&str>, to: Option<&str>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    // Bounded comparisons need a date we can read.
    let Some(date) = normalize_storage_string(&entry.date) else {
        return false;
    };
    from.is_none_or(|f| date.as_str() >= f) && to.is_none_or(|t| date.as_str() <= t)
}
