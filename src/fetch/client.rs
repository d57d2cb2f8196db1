use async_trait::async_trait;
use reqwest::Response;

/// Abstraction over the HTTP transport, so the station pipeline can be
/// exercised against canned responses in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> reqwest::Result<Response>;
}
