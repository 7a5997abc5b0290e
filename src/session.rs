use crate::api::models::SearchResponse;
use crate::data_models::{Page, Pages, SearchQueryId};
use crate::view::ResultLink;

/// One rendered result set together with the id its clicks report under.
///
/// A session is never mutated; each new response replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSession {
    seq: u64,
    search_query_id: Option<SearchQueryId>,
    pages: Pages,
}

impl ResultSession {
    pub fn new(seq: u64, response: SearchResponse) -> Self {
        Self {
            seq,
            search_query_id: response.search_query_id,
            pages: response.pages,
        }
    }

    /// Submission number of the search that produced this session.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn search_query_id(&self) -> Option<&SearchQueryId> {
        self.search_query_id.as_ref()
    }

    /// The id to report clicks under, if clicks are reported at all.
    pub fn tracking_id(&self) -> Option<&SearchQueryId> {
        self.search_query_id.as_ref().filter(|id| id.is_trackable())
    }

    pub fn pages(&self) -> &Pages {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn links(&self) -> impl Iterator<Item = ResultLink> + '_ {
        self.pages.iter().enumerate().map(|(index, page)| ResultLink {
            index,
            url: page.url.clone(),
            text: page.preview(),
        })
    }
}
