//! Endpoint URL construction.

/// Join a configured base URL and an endpoint path with exactly one slash.
///
/// Users paste base URLs with and without trailing slashes; both must work.
///
/// ```
/// use minichat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://api.openai.com/v1/", "chat/completions"),
///     "https://api.openai.com/v1/chat/completions"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');
    format!("{base}/{endpoint}")
}
