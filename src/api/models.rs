use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::data_models::{Pages, SearchQueryId};
use crate::error::SearchError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query_id: Option<SearchQueryId>,
    pub pages: Pages,
}

/// A search answer known to be well-formed JSON. The bytes are kept as
/// received so the order of `pages` survives decoding.
#[derive(Debug, Clone)]
pub struct SearchBody(Vec<u8>);

impl SearchBody {
    pub fn parse(bytes: Vec<u8>) -> Result<Self, SearchError> {
        serde_json::from_slice::<IgnoredAny>(&bytes).map_err(SearchError::Json)?;
        Ok(SearchBody(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl SearchResponse {
    /// Read a result set out of a search body.
    pub fn from_body(body: &SearchBody) -> Result<Self, SearchError> {
        serde_json::from_slice(body.as_bytes()).map_err(SearchError::Decode)
    }
}

#[test]
fn test_search_body_only_checks_json_syntax() {
    assert!(SearchBody::parse(br#"{"error":"Malformed query params"}"#.to_vec()).is_ok());
    assert!(SearchBody::parse(b"null".to_vec()).is_ok());
    assert!(matches!(
        SearchBody::parse(b"<html>oops</html>".to_vec()),
        Err(SearchError::Json(_))
    ));
    assert!(matches!(
        SearchBody::parse(br#"{"pages":{}} trailing"#.to_vec()),
        Err(SearchError::Json(_))
    ));
}

#[test]
fn test_result_set_keeps_page_order() {
    let body = SearchBody::parse(
        br#"{"pages":{"z":{"url":"https://z.com","content":"Z"},"a":{"url":"https://a.com","content":"A"}}}"#
            .to_vec(),
    )
    .unwrap();
    let res = SearchResponse::from_body(&body).unwrap();
    let urls: Vec<&str> = res.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec!["https://z.com", "https://a.com"]);
}

#[derive(Debug, Serialize)]
pub struct VisitedUrlRequest<'a> {
    pub url: &'a str,
}
