/// Case-insensitive substring match on a title.
///
/// An empty query matches every title.
#[must_use]
pub fn title_matches(title: &str, query: &str) -> bool {
    title.to_lowercase().contains(&query.to_lowercase())
}
