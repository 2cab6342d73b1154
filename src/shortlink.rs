//! Route link shortening with an explicit fallback branch.
//!
//! The multi-waypoint maps URL easily exceeds one SMS segment, so it goes
//! through a shortener first. Shortening is best-effort: any failure
//! falls back to the full URL, and the two branches stay distinguishable
//! in the result instead of being swallowed.

use async_trait::async_trait;

use crate::error::ShortenError;

const TINYURL_API: &str = "https://tinyurl.com/api-create.php";

/// The route link as it will be sent out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteLink {
    /// Shortener succeeded.
    Shortened(String),
    /// Shortener failed; the original URL is used as-is.
    Full(String),
}

impl RouteLink {
    pub fn url(&self) -> &str {
        match self {
            Self::Shortened(url) | Self::Full(url) => url,
        }
    }
}

/// Link-shortening collaborator.
#[async_trait]
pub trait LinkShortener: Send + Sync {
    async fn shorten(&self, url: &str) -> Result<String, ShortenError>;
}

/// Shorten a URL, falling back to the original on any failure.
/// The failure is logged, never propagated.
pub async fn shorten_or_fallback(shortener: &dyn LinkShortener, url: &str) -> RouteLink {
    match shortener.shorten(url).await {
        Ok(short) => RouteLink::Shortened(short),
        Err(e) => {
            tracing::warn!(error = %e, "Link shortener unavailable, using full URL");
            RouteLink::Full(url.to_string())
        }
    }
}

// ── TinyURL client ──────────────────────────────────────────────────

/// TinyURL's create endpoint: GET with the target URL, plain-text reply.
pub struct TinyUrlShortener {
    client: reqwest::Client,
}

impl Default for TinyUrlShortener {
    fn default() -> Self {
        Self::new()
    }
}

impl TinyUrlShortener {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LinkShortener for TinyUrlShortener {
    async fn shorten(&self, url: &str) -> Result<String, ShortenError> {
        let response = self
            .client
            .get(TINYURL_API)
            .query(&[("url", url)])
            .send()
            .await
            .map_err(|e| ShortenError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ShortenError(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let short = response
            .text()
            .await
            .map_err(|e| ShortenError(e.to_string()))?;
        let short = short.trim().to_string();
        if short.is_empty() {
            return Err(ShortenError("empty response body".into()));
        }
        Ok(short)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedShortener(Result<String, String>);

    #[async_trait]
    impl LinkShortener for FixedShortener {
        async fn shorten(&self, _url: &str) -> Result<String, ShortenError> {
            self.0.clone().map_err(ShortenError)
        }
    }

    #[tokio::test]
    async fn success_yields_shortened_branch() {
        let shortener = FixedShortener(Ok("https://tinyurl.com/abc".into()));
        let link = shorten_or_fallback(&shortener, "https://maps.example/long").await;
        assert_eq!(link, RouteLink::Shortened("https://tinyurl.com/abc".into()));
        assert_eq!(link.url(), "https://tinyurl.com/abc");
    }

    #[tokio::test]
    async fn failure_yields_full_url_branch() {
        let shortener = FixedShortener(Err("connection refused".into()));
        let link = shorten_or_fallback(&shortener, "https://maps.example/long").await;
        assert_eq!(link, RouteLink::Full("https://maps.example/long".into()));
        assert_eq!(link.url(), "https://maps.example/long");
    }
}
