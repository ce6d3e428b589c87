//! Search filter
//!
//! Case-insensitive substring match over title, url and domain.

use crate::tab::Tab;

/// True when `query` is empty or occurs in any of title, url or domain.
pub fn matches_query(tab: &Tab, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    [&tab.title, &tab.url, &tab.domain]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// The tabs matching `query`, in their original order.
pub fn filter_tabs<'a, I>(tabs: I, query: &str) -> Vec<&'a Tab>
where
    I: IntoIterator<Item = &'a Tab>,
{
    tabs.into_iter()
        .filter(|tab| matches_query(tab, query))
        .collect()
}
