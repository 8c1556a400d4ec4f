//! Pagination math and collection filtering.
//!
//! Tables page through their collections with a fixed page size and show a
//! sliding window of up to ten page numbers. Free-text filtering matches a
//! dotted field path ("person.display") against serialized items, so it
//! works over any record shape without per-type plumbing.

use serde::Serialize;
use serde_json::Value;

/// Most page numbers shown at once in the pager strip.
const PAGE_WINDOW: u64 = 10;

/// Computed description of one page over a collection.
///
/// `start_index`/`end_index` are inclusive positions into the (filtered)
/// collection. An empty collection produces `total_pages == 0` and
/// `current_page == 0`; every other state keeps `current_page` within
/// `1..=total_pages`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pager {
    pub total_items: usize,
    pub current_page: u64,
    pub page_size: usize,
    pub total_pages: u64,
    pub start_index: usize,
    pub end_index: usize,
    /// Page numbers to render, at most [`PAGE_WINDOW`] of them.
    pub pages: Vec<u64>,
}

impl Pager {
    /// Compute the pager for `current_page` over `total_items` items.
    ///
    /// Out-of-range pages are clamped here; callers that must treat them as
    /// a no-op go through [`Pager::try_page`] instead.
    pub fn build(total_items: usize, current_page: u64, page_size: usize) -> Self {
        if total_items == 0 || page_size == 0 {
            return Self {
                page_size,
                ..Self::default()
            };
        }

        let total_pages = (total_items + page_size - 1) / page_size;
        let total_pages = total_pages as u64;
        let current_page = current_page.clamp(1, total_pages);

        // Keep the current page roughly centered once the strip overflows.
        let (first, last) = if total_pages <= PAGE_WINDOW {
            (1, total_pages)
        } else if current_page <= PAGE_WINDOW / 2 + 1 {
            (1, PAGE_WINDOW)
        } else if current_page + PAGE_WINDOW / 2 - 1 >= total_pages {
            (total_pages - (PAGE_WINDOW - 1), total_pages)
        } else {
            (current_page - PAGE_WINDOW / 2, current_page + PAGE_WINDOW / 2 - 1)
        };

        let start_index = (current_page as usize - 1) * page_size;
        let end_index = (start_index + page_size - 1).min(total_items - 1);

        Self {
            total_items,
            current_page,
            page_size,
            total_pages,
            start_index,
            end_index,
            pages: (first..=last).collect(),
        }
    }

    /// Recompute for a requested page, or `None` when the request is out of
    /// range. Callers keep their existing pager in that case.
    pub fn try_page(&self, page: u64) -> Option<Pager> {
        if page < 1 || page > self.total_pages {
            return None;
        }
        Some(Self::build(self.total_items, page, self.page_size))
    }

    /// Index range suitable for slicing the collection.
    pub fn window(&self) -> std::ops::Range<usize> {
        if self.total_items == 0 {
            return 0..0;
        }
        self.start_index..(self.end_index + 1).min(self.total_items)
    }

    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

/// Walk a dotted field path ("person.display") through a JSON value.
pub fn resolve_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// True when the field at `path` contains `needle` (already lowercased).
///
/// Non-string fields are matched against their JSON rendering. Items that
/// fail to serialize or lack the field never match.
pub fn matches_filter<T: Serialize>(item: &T, path: &str, needle: &str) -> bool {
    let Ok(value) = serde_json::to_value(item) else {
        return false;
    };
    match resolve_path(&value, path) {
        Some(Value::String(text)) => text.to_lowercase().contains(needle),
        Some(other) => other.to_string().to_lowercase().contains(needle),
        None => false,
    }
}

/// Keep the items whose `path` field contains `needle`, case-insensitively.
///
/// An empty or whitespace-only needle returns the collection untouched,
/// same allocation and all.
pub fn filter_collection<T: Serialize>(mut items: Vec<T>, path: &str, needle: &str) -> Vec<T> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items.retain(|item| matches_filter(item, path, &needle));
    items
}
