//! Duplicate detection by exact URL

use std::collections::HashSet;

use crate::tab::{Tab, TabId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    /// First tab seen for each URL
    pub canonical: Vec<TabId>,
    /// Every later tab whose URL was already seen
    pub duplicates: Vec<TabId>,
}

impl DuplicateReport {
    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty()
    }
}

/// Split `tabs` into one canonical tab per URL and the duplicate candidates.
/// The first occurrence in inventory order wins.
pub fn find_duplicates(tabs: &[Tab]) -> DuplicateReport {
    let mut seen: HashSet<&str> = HashSet::with_capacity(tabs.len());
    let mut report = DuplicateReport::default();

    for tab in tabs {
        if seen.insert(tab.url.as_str()) {
            report.canonical.push(tab.id);
        } else {
            report.duplicates.push(tab.id);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_url_keeps_first() {
        let tabs = vec![
            Tab::new(1, "Dup", "https://dup.com", None),
            Tab::new(2, "Other", "https://other.com", None),
            Tab::new(3, "Dup again", "https://dup.com", None),
        ];

        let report = find_duplicates(&tabs);
        assert_eq!(report.canonical, vec![1, 2]);
        assert_eq!(report.duplicates, vec![3]);
    }

    #[test]
    fn test_no_duplicates() {
        let tabs = vec![
            Tab::new(1, "A", "https://a.com", None),
            Tab::new(2, "B", "https://b.com", None),
        ];
        assert!(find_duplicates(&tabs).is_empty());
    }
}
