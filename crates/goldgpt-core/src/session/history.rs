//! History index: cached session id → summary mapping for the sidebar.
//!
//! The backend owns the source of truth; this is replaced wholesale on every
//! refresh and never merged.

use chrono::{DateTime, Duration, Utc};

use crate::api::HistoryMap;

/// Titles used when the history endpoint is unavailable.
pub const PLACEHOLDER_TITLES: [&str; 3] = [
    "Gold Investment Strategy",
    "Current Gold Prices Analysis",
    "Silver vs Gold Comparison",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    pub title: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Where the current entries came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistorySource {
    /// Never refreshed.
    #[default]
    Empty,
    Backend,
    Placeholder,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryIndex {
    entries: Vec<HistoryEntry>,
    source: HistorySource,
}

impl HistoryIndex {
    /// Replaces all entries with the backend's mapping.
    pub fn replace(&mut self, map: HistoryMap) {
        let mut entries: Vec<HistoryEntry> = map
            .into_iter()
            .map(|(id, summary)| HistoryEntry {
                id,
                title: summary.title,
                timestamp: summary.timestamp,
            })
            .collect();
        sort_entries(&mut entries);
        self.entries = entries;
        self.source = HistorySource::Backend;
    }

    /// Replaces all entries with the offline placeholder set.
    pub fn use_placeholders(&mut self, now: DateTime<Utc>) {
        self.entries = placeholder_entries(now);
        self.source = HistorySource::Placeholder;
    }

    /// Entries ordered newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn source(&self) -> HistorySource {
        self.source
    }

    pub fn is_placeholder(&self) -> bool {
        self.source == HistorySource::Placeholder
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Placeholder entries dated one, two and three days before `now`.
pub fn placeholder_entries(now: DateTime<Utc>) -> Vec<HistoryEntry> {
    PLACEHOLDER_TITLES
        .iter()
        .zip(1_i64..)
        .map(|(title, days)| HistoryEntry {
            id: days.to_string(),
            title: (*title).to_string(),
            timestamp: Some(now - Duration::days(days)),
        })
        .collect()
}

/// Newest first; unknown timestamps last; ties broken by id.
fn sort_entries(entries: &mut [HistoryEntry]) {
    entries.sort_by(|a, b| match (a.timestamp, b.timestamp) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}

/// Short age label for the sidebar: "Today", "Yesterday", "N days ago", or the date.
pub fn relative_label(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(timestamp) = timestamp else {
        return String::new();
    };
    let days = (now - timestamp).num_days();
    match days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        _ => timestamp.format("%Y-%m-%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::api::HistorySummary;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn placeholders_are_the_three_fixed_titles() {
        let mut index = HistoryIndex::default();
        index.use_placeholders(now());

        let titles: Vec<&str> = index.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, PLACEHOLDER_TITLES);
        assert!(index.is_placeholder());
        assert_eq!(
            index.get("2").and_then(|e| e.timestamp),
            Some(now() - Duration::days(2))
        );
    }

    #[test]
    fn replace_discards_previous_entries_and_sorts() {
        let mut index = HistoryIndex::default();
        index.use_placeholders(now());

        let mut map = HistoryMap::new();
        map.insert(
            "old".to_string(),
            HistorySummary {
                title: "Old".to_string(),
                timestamp: Some(now() - Duration::days(10)),
            },
        );
        map.insert(
            "new".to_string(),
            HistorySummary {
                title: "New".to_string(),
                timestamp: Some(now()),
            },
        );
        map.insert(
            "unknown".to_string(),
            HistorySummary {
                title: "Unknown".to_string(),
                timestamp: None,
            },
        );
        index.replace(map);

        let ids: Vec<&str> = index.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["new", "old", "unknown"]);
        assert_eq!(index.source(), HistorySource::Backend);
        assert!(index.get("1").is_none());
    }

    #[test]
    fn relative_labels() {
        let now = now();
        assert_eq!(relative_label(Some(now), now), "Today");
        assert_eq!(relative_label(Some(now + Duration::hours(3)), now), "Today");
        assert_eq!(relative_label(Some(now - Duration::hours(30)), now), "Yesterday");
        assert_eq!(relative_label(Some(now - Duration::days(4)), now), "4 days ago");
        assert_eq!(relative_label(Some(now - Duration::days(9)), now), "2025-06-06");
        assert_eq!(relative_label(None, now), "");
    }
}
