//! GDELT DOC 2.0 article search.
//!
//! Issues one `GET` against the `artlist` mode of the DOC API and turns the
//! `articles` array into an [`ArticleTable`]. GDELT reports query problems
//! (phrase too short, bad operator) as plain text with a 200 status, so a
//! body that is not JSON is surfaced as an API error.

use crate::config::Config;
use crate::error::{NewsError, Result};
use crate::models::ArticleTable;
use crate::query::QueryFilter;
use crate::sources::ArticleSource;
use crate::utils::truncate_for_log;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

const ERROR_PREVIEW_BYTES: usize = 500;

#[derive(Debug, Deserialize)]
struct ArtListResponse {
    #[serde(default)]
    articles: Vec<Map<String, Value>>,
}

/// HTTP client for the GDELT DOC API.
#[derive(Debug, Clone)]
pub struct GdeltClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl GdeltClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Url`] for an unparseable endpoint and
    /// [`NewsError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        let endpoint = Url::parse(&config.api_url)?;
        Ok(Self { client, endpoint })
    }

    /// The full request URL for `filter`.
    pub fn request_url(&self, filter: &QueryFilter) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", &filter.query_string())
            .append_pair("mode", "artlist")
            .append_pair("maxrecords", &filter.max_records.to_string())
            .append_pair("timespan", filter.timespan.as_str())
            .append_pair("format", "json");
        url
    }
}

impl ArticleSource for GdeltClient {
    #[instrument(
        level = "info",
        skip_all,
        fields(keyword = %filter.keyword, timespan = %filter.timespan, country = ?filter.country)
    )]
    async fn fetch_articles(&self, filter: &QueryFilter) -> Result<ArticleTable> {
        let url = self.request_url(filter);
        debug!(%url, "Querying GDELT");

        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let elapsed_ms = t0.elapsed().as_millis();

        if !status.is_success() {
            warn!(status = status.as_u16(), elapsed_ms, "GDELT request failed");
            return Err(NewsError::Api {
                status: status.as_u16(),
                message: truncate_for_log(body.trim(), ERROR_PREVIEW_BYTES),
            });
        }

        let table = parse_artlist(status.as_u16(), &body)?;
        info!(rows = table.len(), elapsed_ms, "GDELT search returned");
        Ok(table)
    }
}

/// Decode an `artlist` response body.
///
/// An empty body or a JSON object without `articles` is an empty table.
pub fn parse_artlist(status: u16, body: &str) -> Result<ArticleTable> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(ArticleTable::default());
    }

    match serde_json::from_str::<ArtListResponse>(body) {
        Ok(response) => Ok(ArticleTable::from_json_rows(&response.articles)),
        Err(e) if e.is_syntax() || e.is_eof() => Err(NewsError::Api {
            status,
            message: truncate_for_log(body, ERROR_PREVIEW_BYTES),
        }),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Column;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DOC_PATH: &str = "/api/v2/doc/doc";

    fn client_for(server: &MockServer) -> GdeltClient {
        let config = Config {
            api_url: format!("{}{DOC_PATH}", server.uri()),
            timeout_secs: 2,
            ..Config::default()
        };
        GdeltClient::new(&config).unwrap()
    }

    #[test]
    fn request_url_carries_all_parameters() {
        let client = GdeltClient::new(&Config::default()).unwrap();
        let filter = QueryFilter::build(Some("earthquake damage"), Some("3d"), Some("Chile"));
        let url = client.request_url(&filter);

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(url.host_str(), Some("api.gdeltproject.org"));
        assert!(pairs.contains(&(
            "query".into(),
            "\"earthquake damage\" sourcecountry:Chile".into()
        )));
        assert!(pairs.contains(&("mode".into(), "artlist".into())));
        assert!(pairs.contains(&("maxrecords".into(), "250".into())));
        assert!(pairs.contains(&("timespan".into(), "3d".into())));
        assert!(pairs.contains(&("format".into(), "json".into())));
    }

    #[test]
    fn parse_empty_body_is_empty_table() {
        assert!(parse_artlist(200, "  \n").unwrap().is_empty());
        assert!(parse_artlist(200, "{}").unwrap().is_empty());
    }

    #[test]
    fn parse_plain_text_is_api_error() {
        let err = parse_artlist(200, "The specified phrase is too short.").unwrap_err();
        match err {
            NewsError::Api { status, message } => {
                assert_eq!(status, 200);
                assert!(message.contains("too short"));
            }
            other => panic!("Expected Api, got: {other:?}"),
        }
    }

    #[test]
    fn parse_wrong_shape_is_decode_error() {
        let err = parse_artlist(200, r#"{"articles": "nope"}"#).unwrap_err();
        assert!(matches!(err, NewsError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_articles_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .and(query_param("query", "flood"))
            .and(query_param("mode", "artlist"))
            .and(query_param("timespan", "24h"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "articles": [
                    {
                        "url": "http://x/1",
                        "url_mobile": "",
                        "title": "Flood waters rise",
                        "seendate": "20250506T143000Z",
                        "socialimage": "",
                        "domain": "x.com",
                        "language": "English",
                        "sourcecountry": "Chile"
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let filter = QueryFilter::build(Some("flood"), None, None);
        let table = client.fetch_articles(&filter).await.unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.has_column(Column::SourceCountry));
        assert!(!table.has_column(Column::Content));
        assert_eq!(table.rows[0].title.as_deref(), Some("Flood waters rise"));
    }

    #[tokio::test]
    async fn test_fetch_articles_no_results() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let filter = QueryFilter::build(Some("zzzzqqq"), None, None);
        let table = client.fetch_articles(&filter).await.unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_articles_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let filter = QueryFilter::build(None, None, None);
        let err = client.fetch_articles(&filter).await.unwrap_err();

        match err {
            NewsError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("Expected Api, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_articles_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let config = Config {
            api_url: format!("{}{DOC_PATH}", server.uri()),
            timeout_secs: 1,
            ..Config::default()
        };
        let client = GdeltClient::new(&config).unwrap();
        let filter = QueryFilter::build(None, None, None);
        let err = client.fetch_articles(&filter).await.unwrap_err();
        assert!(matches!(err, NewsError::Http(_)));
    }
}
