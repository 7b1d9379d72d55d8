use crate::errors::FeedResult;

#[cfg_attr(test, mockall::automock)]
pub trait DocumentLoader: Send + Sync {
    /// Raw bytes of a feed given as a file path or an http(s) URL
    fn load_feed(&self, source: &str) -> FeedResult<Vec<u8>>;

    /// HTML of an article page
    fn fetch_page(&self, url: &str) -> FeedResult<String>;
}
