//! reqwest-backed fetcher.

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Instant;

use super::classify::{classify_response, BlockPolicy};
use super::protocols::{FetchOutcome, FetchRequest, Fetcher};
use crate::config::HarvestConfig;
use crate::errors::AsinflowError;

/// Issues real HTTP requests.
///
/// reqwest binds proxies at client construction, so one client is kept per
/// relay (plus one for direct connections) and reused across attempts.
pub struct HttpFetcher {
    accept_language: HeaderValue,
    policy: BlockPolicy,
    clients: DashMap<Option<String>, reqwest::Client>,
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("accept_language", &self.accept_language)
            .field("cached_clients", &self.clients.len())
            .finish_non_exhaustive()
    }
}

impl HttpFetcher {
    /// Creates a fetcher using the headers and block policy from `config`.
    pub fn new(config: &HarvestConfig) -> Result<Self, AsinflowError> {
        let accept_language = HeaderValue::from_str(&config.accept_language)
            .map_err(|e| AsinflowError::config("accept_language", e))?;
        Ok(Self {
            accept_language,
            policy: BlockPolicy::from_config(config),
            clients: DashMap::new(),
        })
    }

    fn client_for(&self, relay: Option<&str>) -> Result<reqwest::Client, reqwest::Error> {
        let key = relay.map(str::to_string);
        if let Some(client) = self.clients.get(&key) {
            return Ok(client.clone());
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, self.accept_language.clone());

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(relay) = relay {
            builder = builder.proxy(reqwest::Proxy::all(relay_url(relay))?);
        }
        let client = builder.build()?;

        self.clients.insert(key, client.clone());
        Ok(client)
    }

    async fn send(&self, request: &FetchRequest) -> Result<(u16, String), reqwest::Error> {
        let client = self.client_for(request.relay.as_deref())?;
        let response = client
            .get(&request.url)
            .header(USER_AGENT, request.identity.as_str())
            .timeout(request.timeout)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

fn relay_url(relay: &str) -> String {
    if relay.contains("://") {
        relay.to_string()
    } else {
        format!("http://{relay}")
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> FetchOutcome {
        let start = Instant::now();
        let result = tokio::time::timeout(request.timeout, self.send(request)).await;

        let outcome = match result {
            Ok(Ok((status, body))) => classify_response(&self.policy, status, body),
            Ok(Err(err)) => FetchOutcome::transport(err.to_string()),
            Err(_) => FetchOutcome::transport(format!(
                "Request timed out after {}s",
                request.timeout.as_secs()
            )),
        };

        tracing::debug!(
            identifier = %request.identifier,
            relay = request.relay.as_deref().unwrap_or("direct"),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            ok = outcome.is_ok(),
            "Fetch attempt finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::CHALLENGE_REASON;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(server: &MockServer, id: &str, timeout: Duration) -> FetchRequest {
        FetchRequest {
            identifier: id.to_string(),
            url: format!("{}/dp/{}", server.uri(), id),
            identity: "test-agent/1.0".to_string(),
            relay: None,
            timeout,
        }
    }

    #[test]
    fn test_relay_url() {
        assert_eq!(relay_url("10.0.0.1:8080"), "http://10.0.0.1:8080");
        assert_eq!(relay_url("socks5://10.0.0.1:1080"), "socks5://10.0.0.1:1080");
    }

    #[tokio::test]
    async fn test_fetch_sends_identity_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dp/B000123456"))
            .and(header("user-agent", "test-agent/1.0"))
            .and(header("accept-language", "en-IN,en-US;q=0.9"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>page</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&HarvestConfig::default()).expect("fetcher");
        let outcome = fetcher
            .fetch(&request(&server, "B000123456", Duration::from_secs(5)))
            .await;

        assert_eq!(outcome, FetchOutcome::ok("<html>page</html>", 200));
    }

    #[tokio::test]
    async fn test_fetch_classifies_503_as_blocked() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&HarvestConfig::default()).expect("fetcher");
        let outcome = fetcher
            .fetch(&request(&server, "B0BLOCKED1", Duration::from_secs(5)))
            .await;

        assert!(matches!(outcome, FetchOutcome::Blocked { .. }));
    }

    #[tokio::test]
    async fn test_fetch_classifies_captcha_as_blocked() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<p>Enter the characters you see below</p><img src=\"/captcha/x.jpg\">"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&HarvestConfig::default()).expect("fetcher");
        let outcome = fetcher
            .fetch(&request(&server, "B0CAPTCHA1", Duration::from_secs(5)))
            .await;

        assert_eq!(outcome, FetchOutcome::blocked(CHALLENGE_REASON));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&HarvestConfig::default()).expect("fetcher");
        let outcome = fetcher
            .fetch(&request(&server, "B0SLOW0001", Duration::from_millis(200)))
            .await;

        assert!(matches!(outcome, FetchOutcome::TransportFailure { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_transport_failure() {
        let fetcher = HttpFetcher::new(&HarvestConfig::default()).expect("fetcher");
        let outcome = fetcher
            .fetch(&FetchRequest {
                identifier: "B0RELAY001".to_string(),
                url: "http://example.invalid/dp/B0RELAY001".to_string(),
                identity: "test-agent/1.0".to_string(),
                relay: Some("127.0.0.1:1".to_string()),
                timeout: Duration::from_secs(2),
            })
            .await;

        assert!(matches!(outcome, FetchOutcome::TransportFailure { .. }));
    }
}
