/// Strips everything from the first `#` onward
///
/// The result is the traversal key for a discovered link, so that
/// `https://example.com/a#intro` and `https://example.com/a#usage` are fetched
/// once. The input is not otherwise normalized and does not need to be a
/// well-formed URL.
///
/// # Examples
///
/// ```
/// use find404_crawler::url::strip_fragment;
///
/// assert_eq!(strip_fragment("https://example.com/a#b"), "https://example.com/a");
/// assert_eq!(strip_fragment("https://example.com/a"), "https://example.com/a");
/// assert_eq!(strip_fragment("#top"), "");
/// ```
pub fn strip_fragment(url: &str) -> &str {
    match url.find('#') {
        Some(index) => &url[..index],
        None => url,
    }
}
