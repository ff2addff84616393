use url::Url;

/// Lower-cased host of an absolute HTTP(S) URL.
///
/// Returns `None` for relative, malformed or non-HTTP links.
#[must_use]
pub fn host_of(link: &str) -> Option<String> {
    let url = Url::parse(link.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.host_str().map(str::to_ascii_lowercase)
}

/// Whether `link` looks fetchable at all.
#[must_use]
pub fn is_fetchable(link: &str) -> bool {
    host_of(link).is_some()
}
