//! Practicum adapter (homework statuses).
//!
//! Implements the `hwb-core` StatusSource over the `homework_statuses` endpoint.

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, StatusCode};
use serde_json::Value;

use hwb_core::{domain::StatusQuery, errors::Error, homework::StatusSource, Result};

#[derive(Clone, Debug)]
pub struct PracticumClient {
    token: String,
    endpoint: String,
    http: reqwest::Client,
}

impl PracticumClient {
    pub fn new(token: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::External(format!("не удалось создать HTTP-клиент: {e}")))?;
        Ok(Self {
            token: token.into(),
            endpoint: endpoint.into(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch_statuses(&self, query: StatusQuery) -> Result<Value> {
        let params = format!("from_date={}", query.from_date);
        tracing::info!(endpoint = %self.endpoint, %params, "requesting homework statuses");

        let connection_error = |e: reqwest::Error| Error::Connection {
            endpoint: self.endpoint.clone(),
            params: params.clone(),
            reason: e.to_string(),
        };

        let resp = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", query.from_date)])
            .send()
            .await
            .map_err(connection_error)?;

        if resp.status() != StatusCode::OK {
            return Err(Error::RemoteUnavailable {
                url: resp.url().to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().await.map_err(connection_error)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base: &str) -> PracticumClient {
        PracticumClient::new("secret", format!("{base}/api/user_api/homework_statuses/")).unwrap()
    }

    #[tokio::test]
    async fn returns_raw_body_on_success() {
        let server = MockServer::start().await;
        let body = json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1700000000
        });

        Mock::given(method("GET"))
            .and(path("/api/user_api/homework_statuses/"))
            .and(header("Authorization", "OAuth secret"))
            .and(query_param("from_date", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let got = client(&server.uri())
            .fetch_statuses(StatusQuery { from_date: 42 })
            .await
            .unwrap();
        assert_eq!(got, body);
    }

    #[tokio::test]
    async fn non_ok_status_is_remote_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client(&server.uri())
            .fetch_statuses(StatusQuery { from_date: 7 })
            .await
            .unwrap_err();
        match err {
            Error::RemoteUnavailable { url, status } => {
                assert_eq!(status, 503);
                assert!(url.contains("from_date=7"), "{url}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_success_codes_are_not_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = client(&server.uri())
            .fetch_statuses(StatusQuery { from_date: 0 })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RemoteUnavailable { status: 204, .. }));
    }

    #[tokio::test]
    async fn undecodable_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client(&server.uri())
            .fetch_statuses(StatusQuery { from_date: 0 })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_connection_error() {
        // Nothing listens on port 1.
        let client = PracticumClient::new("secret", "http://127.0.0.1:1/hw/").unwrap();

        let err = client
            .fetch_statuses(StatusQuery { from_date: 5 })
            .await
            .unwrap_err();
        match err {
            Error::Connection {
                endpoint, params, ..
            } => {
                assert_eq!(endpoint, "http://127.0.0.1:1/hw/");
                assert_eq!(params, "from_date=5");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
