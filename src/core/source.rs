use crate::core::{ConfigProvider, Record, RecordSource};
use crate::utils::error::{ResumeError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// Reads one column at a time from a Supabase (PostgREST) table.
pub struct SupabaseSource {
    client: Client,
    endpoint: String,
    api_key: String,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl SupabaseSource {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/rest/v1/{}",
                config.base_url().trim_end_matches('/'),
                config.table()
            ),
            api_key: config.api_key().to_string(),
            retry_attempts: config.retry_attempts(),
            retry_delay: config.retry_delay(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, column: &str) -> Result<Response> {
        let mut attempt = 0;
        loop {
            let result = self
                .client
                .get(&self.endpoint)
                .query(&[("select", column)])
                .header("apikey", &self.api_key)
                .bearer_auth(&self.api_key)
                .send()
                .await;

            match result {
                Ok(response) => return Ok(response),
                // 只重試連線與逾時錯誤
                Err(e) if (e.is_connect() || e.is_timeout()) && attempt < self.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        "Upstream request for '{}' failed ({}), retry {}/{}",
                        column,
                        e,
                        attempt,
                        self.retry_attempts
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[async_trait]
impl RecordSource for SupabaseSource {
    async fn select(&self, column: &str) -> Result<Vec<Record>> {
        tracing::debug!("Making API request to: {} (select={})", self.endpoint, column);
        let response = self.send(column).await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        // 只接受 200，其他 2xx 也視為上游錯誤
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Error fetching data");
            return Err(ResumeError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let json_data: serde_json::Value = serde_json::from_slice(&bytes)?;

        match json_data {
            serde_json::Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    serde_json::Value::Object(obj) => Ok(Record::from_object(obj)),
                    other => Err(ResumeError::MalformedResponse {
                        message: format!("item {} is not an object: {}", index, other),
                    }),
                })
                .collect(),
            other => Err(ResumeError::MalformedResponse {
                message: format!("expected a JSON array, got {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use httpmock::prelude::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedBuffer {
        type Writer = SharedBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn config_for(server: &MockServer) -> ServiceConfig {
        ServiceConfig::new(server.base_url(), "test-key")
    }

    #[tokio::test]
    async fn test_select_sends_column_and_credentials() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/rest/v1/resume")
                .query_param("select", "Summary")
                .header("apikey", "test-key")
                .header("authorization", "Bearer test-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{"Summary": "A"}, {"Summary": "B"}]));
        });

        let source = SupabaseSource::new(&config_for(&server)).unwrap();
        let records = source.select("Summary").await.unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Summary").unwrap(), "A");
        assert_eq!(records[1].get("Summary").unwrap(), "B");
    }

    #[tokio::test]
    async fn test_select_uses_configured_table() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/rest/v1/cv");
            then.status(200).json_body(serde_json::json!([]));
        });

        let mut config = config_for(&server);
        config.table = "cv".to_string();
        let source = SupabaseSource::new(&config).unwrap();

        assert!(source.endpoint().ends_with("/rest/v1/cv"));
        assert!(source.select("Tech").await.unwrap().is_empty());
        api_mock.assert();
    }

    #[tokio::test]
    async fn test_non_success_status_keeps_raw_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/rest/v1/resume");
            then.status(503).body("service unavailable");
        });

        let source = SupabaseSource::new(&config_for(&server)).unwrap();
        let err = source.select("Projects").await.unwrap_err();

        api_mock.assert();
        match err {
            ResumeError::UpstreamStatus { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "service unavailable");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_other_success_statuses_are_rejected() {
        for code in [201, 203, 206] {
            let server = MockServer::start();
            server.mock(|when, then| {
                when.method(GET).path("/rest/v1/resume");
                then.status(code).json_body(serde_json::json!([{"Tech": "Rust"}]));
            });

            let source = SupabaseSource::new(&config_for(&server)).unwrap();
            let err = source.select("Tech").await.unwrap_err();

            assert!(
                matches!(err, ResumeError::UpstreamStatus { status, .. } if status == code),
                "status {}",
                code
            );
        }
    }

    #[tokio::test]
    async fn test_upstream_body_is_logged() {
        let buffer = SharedBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/v1/resume");
            then.status(503).body("service unavailable");
        });

        let source = SupabaseSource::new(&config_for(&server)).unwrap();
        assert!(source.select("Projects").await.is_err());

        let logs = buffer.contents();
        let error_line = logs
            .lines()
            .find(|line| line.contains("ERROR") && line.contains("Error fetching data"))
            .unwrap_or_else(|| panic!("no error event in logs: {}", logs));
        assert!(error_line.contains("service unavailable"), "{}", error_line);
        assert!(error_line.contains("503"), "{}", error_line);
    }

    #[tokio::test]
    async fn test_status_errors_are_not_retried() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/rest/v1/resume");
            then.status(500);
        });

        let mut config = config_for(&server);
        config.retry_attempts = 3;
        let source = SupabaseSource::new(&config).unwrap();

        assert!(source.select("Tech").await.is_err());
        api_mock.assert_hits(1);
    }

    #[tokio::test]
    async fn test_invalid_json_is_upstream_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/v1/resume");
            then.status(200).body("<html>oops</html>");
        });

        let source = SupabaseSource::new(&config_for(&server)).unwrap();
        let err = source.select("Summary").await.unwrap_err();

        assert!(matches!(err, ResumeError::SerializationError(_)));
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_non_array_body_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/v1/resume");
            then.status(200)
                .json_body(serde_json::json!({"message": "not a list"}));
        });

        let source = SupabaseSource::new(&config_for(&server)).unwrap();
        let err = source.select("Summary").await.unwrap_err();

        assert!(matches!(err, ResumeError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_non_object_item_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/v1/resume");
            then.status(200).json_body(serde_json::json!([{"Tech": "Rust"}, 42]));
        });

        let source = SupabaseSource::new(&config_for(&server)).unwrap();
        let err = source.select("Tech").await.unwrap_err();

        assert!(matches!(err, ResumeError::MalformedResponse { ref message } if message.contains("item 1")));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/v1/resume");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(serde_json::json!([]));
        });

        let mut config = config_for(&server);
        config.request_timeout = Duration::from_millis(200);
        let source = SupabaseSource::new(&config).unwrap();

        let err = source.select("Summary").await.unwrap_err();
        match err {
            ResumeError::UpstreamTransport(e) => assert!(e.is_timeout()),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeouts_are_retried() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/rest/v1/resume");
            then.status(200)
                .delay(Duration::from_millis(1000))
                .json_body(serde_json::json!([]));
        });

        let mut config = config_for(&server);
        config.request_timeout = Duration::from_millis(150);
        config.retry_attempts = 1;
        config.retry_delay = Duration::from_millis(10);
        let source = SupabaseSource::new(&config).unwrap();

        assert!(source.select("Summary").await.is_err());
        // httpmock records the hit on arrival, before the delayed reply.
        api_mock.assert_hits(2);
    }
}
