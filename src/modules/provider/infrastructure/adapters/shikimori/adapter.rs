use crate::{
    modules::anime::AnimeRecord,
    modules::provider::infrastructure::http_client::{decode_body, ApiClient},
    modules::provider::traits::PageSource,
    shared::application::PaginationParams,
    shared::config::AppConfig,
    shared::errors::AppResult,
};
use async_trait::async_trait;

use super::mapper::{RecordMapper, ShikimoriMapper};
use super::models::*;

const PROVIDER_NAME: &str = "Shikimori";
const ANIMES_PATH: &str = "/api/animes";

/// Full request URL for one page, query in the order the API expects
pub fn page_url(base_url: &str, page: i64) -> String {
    let query = PaginationParams::new(page)
        .query_pairs()
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}{}?{}", base_url.trim_end_matches('/'), ANIMES_PATH, query)
}

/// Shikimori provider adapter over the public REST API
pub struct ShikimoriAdapter {
    http_client: ApiClient,
    base_url: String,
    mapper: ShikimoriMapper,
}

impl ShikimoriAdapter {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http_client = ApiClient::new(PROVIDER_NAME, config.timeout, &config.user_agent)?;
        Ok(Self::with_client(http_client, &config.base_url))
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: ApiClient, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http_client,
            mapper: ShikimoriMapper::new(&base_url),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Decode a raw `/api/animes` body into domain records
    pub fn decode_page(&self, body: &str) -> AppResult<Vec<AnimeRecord>> {
        let list: ShikimoriAnimeList = decode_body(PROVIDER_NAME, body)?;
        Ok(self.mapper.map_to_records(list))
    }
}

#[async_trait]
impl PageSource for ShikimoriAdapter {
    fn source_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn fetch_records(&self, page: i64) -> AppResult<Vec<AnimeRecord>> {
        let params = PaginationParams::new(page);
        let endpoint = format!("{}{}", self.base_url, ANIMES_PATH);

        log::info!("Shikimori: Fetching {}", page_url(&self.base_url, page));

        let list: ShikimoriAnimeList = self
            .http_client
            .get_json(&endpoint, &params.query_pairs())
            .await?;

        log::info!("Shikimori: Page {} returned {} records", page, list.len());
        Ok(self.mapper.map_to_records(list))
    }
}
