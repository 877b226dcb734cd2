//! Shared pagination helper for the list endpoints.

/// Parse the `page` query value. 1-indexed; missing, non-numeric or zero
/// values fall back to page 1.
pub fn page_from_query(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Return the slice of `rows` for `page`, at most `per_page` records starting
/// at offset `(page - 1) * per_page`. Slicing past the end yields an empty
/// vector, never an error; callers interpret emptiness themselves.
pub fn paginate<T: Clone>(rows: &[T], page: usize, per_page: usize) -> Vec<T> {
    let start = (page - 1).saturating_mul(per_page);
    rows.iter().skip(start).take(per_page).cloned().collect()
}
