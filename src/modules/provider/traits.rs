use crate::modules::anime::AnimeRecord;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// A paged catalogue of anime records.
///
/// One call is one outbound request: implementations must not cache,
/// retry or de-duplicate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Name used in logs
    fn source_name(&self) -> &'static str;

    /// Fetch one page of records in API order. `page` is forwarded as-is.
    async fn fetch_records(&self, page: i64) -> AppResult<Vec<AnimeRecord>>;
}
