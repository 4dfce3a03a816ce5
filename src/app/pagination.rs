//! Fixed-size pagination over the filtered view.

/// Rows shown per page.
pub const PAGE_SIZE: usize = 10;

/// Navigation requests coming from the pagination bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageTarget {
    First,
    Previous,
    Number(usize),
    Next,
    Last,
}

/// Number of pages needed for `len` rows; 0 for an empty view.
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Keep `page` inside `[1, max(1, total)]`.
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}

/// Resolve a navigation request against the current page, clamped.
pub fn resolve_target(target: PageTarget, current: usize, total: usize) -> usize {
    let wanted = match target {
        PageTarget::First => 1,
        PageTarget::Previous => current.saturating_sub(1),
        PageTarget::Number(n) => n,
        PageTarget::Next => current.saturating_add(1),
        PageTarget::Last => total,
    };
    clamp_page(wanted, total)
}

/// Rows of `items` on 1-based `page`. Out-of-range pages yield an empty slice.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}
