//! Reduce an event's build statuses to a badge label and color.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Canonical badge levels in severity order, lowest first. The order is both
/// the label order and the color priority: the most severe level present
/// decides the color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BadgeLevel {
    Success,
    Queued,
    Running,
    Unknown,
    Failure,
    Aborted,
}

impl BadgeLevel {
    pub const ALL: [BadgeLevel; 6] = [
        BadgeLevel::Success,
        BadgeLevel::Queued,
        BadgeLevel::Running,
        BadgeLevel::Unknown,
        BadgeLevel::Failure,
        BadgeLevel::Aborted,
    ];

    /// Parses an already-lowercased status.
    pub fn from_status(status: &str) -> Option<Self> {
        match status {
            "success" => Some(Self::Success),
            "queued" => Some(Self::Queued),
            "running" => Some(Self::Running),
            "unknown" => Some(Self::Unknown),
            "failure" => Some(Self::Failure),
            "aborted" => Some(Self::Aborted),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Unknown => "unknown",
            Self::Failure => "failure",
            Self::Aborted => "aborted",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Success => "green",
            Self::Queued | Self::Running => "blue",
            Self::Unknown => "lightgrey",
            Self::Failure | Self::Aborted => "red",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BadgeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color of a badge with nothing to report.
pub const DEFAULT_COLOR: &str = "lightgrey";

/// Computed badge text and color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeStatus {
    pub label: String,
    pub color: String,
}

impl Default for BadgeStatus {
    fn default() -> Self {
        Self { label: String::new(), color: DEFAULT_COLOR.to_string() }
    }
}

/// Per-level build counts. Statuses outside the canonical set are kept
/// verbatim in `other` and never reach the label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTally {
    counts: [usize; BadgeLevel::ALL.len()],
    other: BTreeMap<String, usize>,
}

impl StatusTally {
    /// Tallies already-normalized statuses.
    pub fn from_statuses<'a>(statuses: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tally = Self::default();
        for status in statuses {
            tally.record(status);
        }
        tally
    }

    pub fn record(&mut self, status: &str) {
        match BadgeLevel::from_status(status) {
            Some(level) => self.counts[level.index()] += 1,
            None => *self.other.entry(status.to_string()).or_insert(0) += 1,
        }
    }

    pub fn count(&self, level: BadgeLevel) -> usize {
        self.counts[level.index()]
    }

    pub fn unrecognized(&self) -> &BTreeMap<String, usize> {
        &self.other
    }

    /// Label fragments in severity order plus the color of the most severe
    /// level present.
    pub fn to_badge(&self) -> BadgeStatus {
        let mut parts = Vec::new();
        let mut color = DEFAULT_COLOR;

        for level in BadgeLevel::ALL {
            let count = self.count(level);
            if count > 0 {
                parts.push(format!("{count} {level}"));
                color = level.color();
            }
        }

        BadgeStatus { label: parts.join(", "), color: color.to_string() }
    }
}

/// Lowercases `statuses`, pads with `unknown` up to `reachable_count`, and
/// reduces the result to a badge. Never truncates.
pub fn aggregate<S: AsRef<str>>(statuses: &[S], reachable_count: usize) -> BadgeStatus {
    let mut normalized: Vec<String> =
        statuses.iter().map(|s| s.as_ref().to_lowercase()).collect();

    if reachable_count > normalized.len() {
        normalized.resize(reachable_count, BadgeLevel::Unknown.as_str().to_string());
    }

    let tally = StatusTally::from_statuses(normalized.iter().map(String::as_str));
    if !tally.unrecognized().is_empty() {
        tracing::debug!(other = ?tally.unrecognized(), "Statuses left out of badge label");
    }
    tally.to_badge()
}
