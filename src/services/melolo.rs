use crate::http_client::{ApiClient, RequestOptions};
use crate::provider::ProviderId;
use crate::services::mapping::{map_mall_book, map_search_item};
use crate::types::melolo::{
    AccountStatus, BookMallResponse, SearchResponse, SeriesApiResponse, VideoApiResponse,
};
use crate::types::{Book, SearchResult};
use tracing::debug;

/// Melolo 接口
#[derive(Debug, Clone)]
pub struct MeloloService {
    api: ApiClient,
}

impl MeloloService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// 图片代理使用 Melolo 的基础地址
    fn proxy_base(&self) -> crate::Result<String> {
        Ok(self.api.base_url(ProviderId::Melolo)?.to_string())
    }

    /// 首页书城 (不带搜索)
    /// GET /bookmall
    pub async fn home_books(&self) -> crate::Result<Vec<Book>> {
        let data: BookMallResponse = self
            .api
            .request(ProviderId::Melolo, "/bookmall", RequestOptions::new())
            .await?;
        let proxy_base = self.proxy_base()?;
        let books = data.cell.and_then(|c| c.books).unwrap_or_default();
        debug!("书城返回 {} 本", books.len());
        Ok(books
            .into_iter()
            .map(|b| map_mall_book(&proxy_base, b))
            .collect())
    }

    /// 按关键词搜索
    /// GET /search?query=
    pub async fn search_books(&self, query: &str) -> crate::Result<SearchResult> {
        let data: SearchResponse = self
            .api
            .request(
                ProviderId::Melolo,
                "/search",
                RequestOptions::new().query("query", query),
            )
            .await?;
        let proxy_base = self.proxy_base()?;
        let items = data.items.unwrap_or_default();
        let total = data.total.unwrap_or(items.len() as u64);
        let books = items
            .into_iter()
            .map(|item| map_search_item(&proxy_base, item))
            .collect();

        Ok(SearchResult {
            books,
            total,
            query: query.to_string(),
        })
    }

    /// 剧集详情与分集列表
    /// GET /series?series_id=
    pub async fn series(&self, series_id: &str) -> crate::Result<SeriesApiResponse> {
        self.api
            .request(
                ProviderId::Melolo,
                "/series",
                RequestOptions::new().query("series_id", series_id),
            )
            .await
    }

    /// 播放地址
    /// GET /video?video_id=
    pub async fn video(&self, video_id: &str) -> crate::Result<VideoApiResponse> {
        self.api
            .request(
                ProviderId::Melolo,
                "/video",
                RequestOptions::new().query("video_id", video_id),
            )
            .await
    }

    /// GET /account/status?telegram_id=
    pub async fn account_status(&self, telegram_id: i64) -> crate::Result<AccountStatus> {
        self.api
            .request(
                ProviderId::Melolo,
                "/account/status",
                RequestOptions::new().query("telegram_id", telegram_id),
            )
            .await
    }
}
