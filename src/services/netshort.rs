use crate::http_client::{ApiClient, RequestOptions};
use crate::provider::ProviderId;
use crate::types::netshort::{
    EpisodeListResponse, HomeResponse, ShortPlayGroup, UnlockEpisodeResponse,
};

pub const DEFAULT_TAB_ID: &str = "1894773235170693121";
pub const DEFAULT_OFFSET: u32 = 0;
pub const DEFAULT_LIMIT: u32 = 20;

/// 首页分页参数，缺省值见 `DEFAULT_*`
#[derive(Debug, Clone, Default)]
pub struct HomeParams {
    pub tab_id: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Netshort 接口
#[derive(Debug, Clone)]
pub struct NetshortService {
    api: ApiClient,
}

impl NetshortService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// GET /api/get-home?tabId=&offset=&limit=
    pub async fn home(&self, params: HomeParams) -> crate::Result<Vec<ShortPlayGroup>> {
        let tab_id = params
            .tab_id
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TAB_ID.to_string());
        let options = RequestOptions::new()
            .query("tabId", tab_id)
            .query("offset", params.offset.unwrap_or(DEFAULT_OFFSET))
            .query("limit", params.limit.unwrap_or(DEFAULT_LIMIT));

        let res: HomeResponse = self
            .api
            .request(ProviderId::Netshort, "/api/get-home", options)
            .await?;
        Ok(res.data.and_then(|d| d.data).unwrap_or_default())
    }

    /// 分集列表
    /// GET /api/getepisode/{id}
    pub async fn episodes(&self, short_play_id: &str) -> crate::Result<EpisodeListResponse> {
        let path = format!("/api/getepisode/{}", urlencoding::encode(short_play_id));
        self.api
            .request(ProviderId::Netshort, &path, RequestOptions::new())
            .await
    }

    /// 解锁单集
    /// GET /api/getepisode/{id}/{episodeNo}
    pub async fn unlock_episode(
        &self,
        short_play_id: &str,
        episode_no: u32,
    ) -> crate::Result<UnlockEpisodeResponse> {
        let path = format!(
            "/api/getepisode/{}/{}",
            urlencoding::encode(short_play_id),
            episode_no
        );
        self.api
            .request(ProviderId::Netshort, &path, RequestOptions::new())
            .await
    }
}
