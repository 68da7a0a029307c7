//! HTTP client for the BSUIR IIS schedule API.

use super::ScheduleFeed;
use async_trait::async_trait;
use reqwest::Client;
use shaku::{Component, Interface};
use timetable_config::ExternalApiConfig;
use timetable_core::{TimetableError, TimetableResult};
use tracing::{debug, warn};

/// Service name reported in fetch errors.
pub const FEED_SERVICE_NAME: &str = "BSUIR IIS API";

/// Fetches a group's weekly schedule feed.
#[async_trait]
pub trait ScheduleFeedClient: Interface {
    async fn fetch(&self, group_number: &str) -> TimetableResult<ScheduleFeed>;
}

/// reqwest-backed feed client.
#[derive(Component, Clone)]
#[shaku(interface = ScheduleFeedClient)]
pub struct BsuirScheduleClient {
    http: Client,
    config: ExternalApiConfig,
}

fn build_http_client(config: &ExternalApiConfig) -> TimetableResult<Client> {
    Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| TimetableError::internal(format!("Failed to create HTTP client: {}", e)))
}

impl BsuirScheduleClient {
    /// Creates a client from configuration.
    pub fn new(config: &ExternalApiConfig) -> TimetableResult<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            config: config.clone(),
        })
    }

    /// Builds the DI parameters from configuration.
    pub fn build_parameters(
        config: &ExternalApiConfig,
    ) -> TimetableResult<BsuirScheduleClientParameters> {
        Ok(BsuirScheduleClientParameters {
            http: build_http_client(config)?,
            config: config.clone(),
        })
    }
}

fn fetch_error(message: impl ToString) -> TimetableError {
    TimetableError::external_fetch(FEED_SERVICE_NAME, message)
}

#[async_trait]
impl ScheduleFeedClient for BsuirScheduleClient {
    async fn fetch(&self, group_number: &str) -> TimetableResult<ScheduleFeed> {
        let url = self.config.url_for(group_number);
        debug!("Fetching schedule feed: {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!("Schedule feed request failed: {}", e);
            fetch_error(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Schedule feed returned {} for group {}", status, group_number);
            return Err(fetch_error(format!("unexpected status {}", status)));
        }

        let body = response.text().await.map_err(fetch_error)?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("Schedule feed for group {} is malformed: {}", group_number, e);
            fetch_error(format!("malformed response: {}", e))
        })
    }
}

impl std::fmt::Debug for BsuirScheduleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BsuirScheduleClient")
            .field("url_template", &self.config.url_template)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> BsuirScheduleClient {
        let config = ExternalApiConfig {
            url_template: format!("{}/api/v1/schedule?studentGroup={{group}}", server.uri()),
            timeout_secs: 5,
            ..ExternalApiConfig::default()
        };
        BsuirScheduleClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_parses_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/schedule"))
            .and(query_param("studentGroup", "350501"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"schedules":{"Среда":[{"subjectFullName":"Physics","startLessonTime":"09:00","endLessonTime":"10:20"}]}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let feed = client_for(&server).await.fetch("350501").await.unwrap();

        let lessons = feed.lessons_on("Среда");
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].subject_full_name.as_deref(), Some("Physics"));
    }

    #[tokio::test]
    async fn test_group_number_with_query_characters_arrives_intact() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/schedule"))
            .and(query_param("studentGroup", "3505&x#1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"schedules":{}}"#))
            .expect(1)
            .mount(&server)
            .await;

        let feed = client_for(&server).await.fetch("3505&x#1").await.unwrap();

        assert!(feed.lessons_on("Среда").is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch("350501").await.unwrap_err();

        match err {
            TimetableError::ExternalFetch { service, message } => {
                assert_eq!(service, FEED_SERVICE_NAME);
                assert!(message.contains("503"));
            }
            other => panic!("Expected ExternalFetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch("350501").await.unwrap_err();

        match err {
            TimetableError::ExternalFetch { message, .. } => {
                assert!(message.contains("malformed"));
            }
            other => panic!("Expected ExternalFetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_failure() {
        let config = ExternalApiConfig {
            url_template: "http://127.0.0.1:9/schedule?studentGroup={group}".to_string(),
            timeout_secs: 2,
            ..ExternalApiConfig::default()
        };
        let client = BsuirScheduleClient::new(&config).unwrap();

        let err = client.fetch("350501").await.unwrap_err();
        assert!(matches!(err, TimetableError::ExternalFetch { .. }));
    }
}
