use super::client::HttpClient;
use async_trait::async_trait;

/// Plain unauthenticated client. One GET per station, no retries and no
/// per-request timeout: a slow station delays the run rather than being
/// dropped.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn get(&self, url: &str) -> reqwest::Result<reqwest::Response> {
        self.0.get(url).send().await
    }
}
