//! Netshort 接口响应结构

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortPlayItem {
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub id: String,
    pub short_play_id: String,
    #[serde(default)]
    pub short_play_library_id: Option<String>,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub short_play_name: String,
    #[serde(default)]
    pub short_play_labels: Option<String>,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub label_array: Vec<String>,
    #[serde(default)]
    pub is_new_label: Option<bool>,
    #[serde(default)]
    pub short_play_cover: Option<String>,
    #[serde(default)]
    pub group_short_play_cover: Option<String>,
    #[serde(default)]
    pub shot_introduce: Option<String>,
    #[serde(default)]
    pub script: Option<i64>,
    #[serde(default)]
    pub script_name: Option<String>,
    #[serde(default)]
    pub script_type: Option<i64>,
    #[serde(default)]
    pub heat_score: Option<f64>,
    #[serde(default)]
    pub heat_score_show: Option<String>,
    #[serde(default)]
    pub total_reserve_num: Option<String>,
    #[serde(default)]
    pub is_reserve: Option<i64>,
    #[serde(default)]
    pub publish_time: Option<i64>,
    #[serde(default)]
    pub is_need_high_image: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortPlayGroup {
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub content_type: i64,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub group_id: String,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub content_name: String,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub content_model: i64,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub content_infos: Vec<ShortPlayItem>,
    #[serde(default)]
    pub heat_show_switch: Option<i64>,
    #[serde(default)]
    pub free_end_time: Option<i64>,
    #[serde(default)]
    pub hidden_name: Option<i64>,
    #[serde(default)]
    pub high_show_count: Option<i64>,
    #[serde(default)]
    pub content_remark: Option<String>,
}

/// Netshort 通用外层: `{code, msg, data}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// GET /api/get-home 的 `data` 字段，分组列表在 `data.data`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomePage {
    #[serde(default)]
    pub data: Option<Vec<ShortPlayGroup>>,
}

pub type HomeResponse = Envelope<HomePage>;

/// GET /api/getepisode/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeList {
    #[serde(default)]
    pub short_play_id: Option<String>,
    #[serde(default)]
    pub short_play_name: Option<String>,
    #[serde(default)]
    pub short_play_cover: Option<String>,
    #[serde(default)]
    pub shot_introduce: Option<String>,
    #[serde(default)]
    pub total_episode: Option<u32>,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub short_play_episode_infos: Vec<NetshortEpisode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetshortEpisode {
    #[serde(default)]
    pub episode_id: Option<String>,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub episode_no: u32,
    #[serde(default)]
    pub episode_cover: Option<String>,
    #[serde(default)]
    pub play_voucher: Option<String>,
    #[serde(default)]
    pub is_lock: Option<bool>,
}

pub type EpisodeListResponse = Envelope<EpisodeList>;

/// GET /api/getepisode/{id}/{episodeNo}
pub type UnlockEpisodeResponse = Envelope<NetshortEpisode>;
