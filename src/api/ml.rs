use reqwest::Client;

use super::models::VisitedUrlRequest;
use crate::data_models::SearchQueryId;
use crate::error::ReportError;

/// Client for the ML API's click-through endpoint.
#[derive(Debug, Clone)]
pub struct MlApi {
    client: Client,
    base_url: String,
}

impl MlApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn visited_urls_url(&self, search_query_id: &SearchQueryId) -> String {
        format!(
            "{}/search-queries/{}/visited-urls/",
            self.base_url, search_query_id
        )
    }

    /// Append `url` to the visited URLs of a search query. Only transport
    /// failures are errors; the response itself is discarded.
    pub async fn report_visited_url(
        &self,
        search_query_id: &SearchQueryId,
        url: &str,
    ) -> Result<(), ReportError> {
        let endpoint = self.visited_urls_url(search_query_id);
        // `.json` sets `Content-Type: application/json`
        let res = self
            .client
            .patch(&endpoint)
            .json(&VisitedUrlRequest { url })
            .send()
            .await?;
        log::debug!("reported visit of {url} to {endpoint}: {}", res.status());
        Ok(())
    }
}

#[test]
fn test_visited_urls_url() {
    let api = MlApi::new(Client::new(), "http://localhost:5070");
    assert_eq!(
        api.visited_urls_url(&SearchQueryId::from("abc123")),
        "http://localhost:5070/search-queries/abc123/visited-urls/"
    );
    assert_eq!(
        api.visited_urls_url(&SearchQueryId::from(serde_json::json!(42))),
        "http://localhost:5070/search-queries/42/visited-urls/"
    );
    assert_eq!(
        api.visited_urls_url(&SearchQueryId::from(serde_json::json!(18446744073709551615u64))),
        "http://localhost:5070/search-queries/18446744073709551615/visited-urls/"
    );
}
