use reqwest::Client;

use super::models::SearchBody;
use crate::error::SearchError;

/// Client for the search API's `GET /search` endpoint.
#[derive(Debug, Clone)]
pub struct SearchApi {
    client: Client,
    base_url: String,
}

impl SearchApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for a query. The text goes out exactly as typed, percent-encoded.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}/search?q={}", self.base_url, encode_uri_component(query))
    }

    /// Fetch the JSON body answering `query`.
    ///
    /// The HTTP status is not inspected: any response with a JSON body is a
    /// response. Reading a result set out of it is the caller's job.
    pub async fn search(&self, query: &str) -> Result<SearchBody, SearchError> {
        let url = self.search_url(query);
        log::info!("searching: {url}");

        let res = self.client.get(&url).send().await?;
        let status = res.status();
        if !status.is_success() {
            log::debug!("search api answered {status}, decoding body anyway");
        }

        let body = res.bytes().await?;
        SearchBody::parse(body.to_vec())
    }
}

/// Characters JavaScript's `encodeURIComponent` leaves alone on top of the
/// unreserved set `urlencoding` keeps.
const SUB_DELIMS_KEPT: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode `text` with the escaping of `encodeURIComponent`.
pub fn encode_uri_component(text: &str) -> String {
    // every '%' in the output starts an escape, so no replacement can
    // straddle two of them
    let mut out = urlencoding::encode(text).into_owned();
    for (escaped, kept) in SUB_DELIMS_KEPT {
        out = out.replace(escaped, kept);
    }
    out
}

#[test]
fn test_encode_uri_component_keeps_marks() {
    assert_eq!(encode_uri_component("it's (a)*!"), "it's%20(a)*!");
    assert_eq!(encode_uri_component("-_.~"), "-_.~");
    assert_eq!(encode_uri_component("%21"), "%2521");
    assert_eq!(encode_uri_component("日"), "%E6%97%A5");
}

#[test]
fn test_search_url_percent_encodes_query() {
    let api = SearchApi::new(Client::new(), "http://localhost:5050");
    assert_eq!(
        api.search_url("rust vs go"),
        "http://localhost:5050/search?q=rust%20vs%20go"
    );
    assert_eq!(
        api.search_url("a&b=c?d/e#f+g%"),
        "http://localhost:5050/search?q=a%26b%3Dc%3Fd%2Fe%23f%2Bg%25"
    );
    assert_eq!(api.search_url(""), "http://localhost:5050/search?q=");
}
