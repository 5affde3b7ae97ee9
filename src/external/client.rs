use std::sync::LazyLock;
use std::time::Duration;

/// User-Agent sent with every outbound request
pub const USER_AGENT: &str = concat!("courier-rs/", env!("CARGO_PKG_VERSION"));

/// Global HTTP client instance shared by the HTTP-backed collaborators
///
/// Initialized lazily on first access and reused across the application, so
/// connections and DNS lookups are pooled between dispatches.
///
/// # Features
/// - **Timeouts**: 30s request timeout, 10s connect timeout (per-request
///   timeouts from settings take precedence)
/// - **Compression**: gzip and deflate
/// - **HTTP/2**: adaptive window sizing
///
/// # Example
/// ```ignore
/// use courier_rs::external::client::HTTP_CLIENT;
///
/// async fn shorten(endpoint: &str, url: &str) -> Result<String, reqwest::Error> {
///     HTTP_CLIENT
///         .post(endpoint)
///         .json(&serde_json::json!({ "url": url }))
///         .send()
///         .await?
///         .text()
///         .await
/// }
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .http2_adaptive_window(true)
        .gzip(true)
        .deflate(true)
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
});
