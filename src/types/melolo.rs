//! Melolo 接口响应结构

use super::SeriesId;
use serde::{Deserialize, Serialize};

/// GET /bookmall
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookMallResponse {
    #[serde(default)]
    pub cell: Option<BookMallCell>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookMallCell {
    #[serde(default)]
    pub books: Option<Vec<MallBook>>,
    #[serde(default)]
    pub english_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// 书城中的一本书，字段与前端模型一致，封面为原始地址
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MallBook {
    pub book_id: String,
    pub book_name: String,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub author: String,
    #[serde(default, rename = "abstract", deserialize_with = "crate::types::null_default")]
    pub abstract_text: String,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub thumb_url: String,
    #[serde(default)]
    pub stat_infos: Option<Vec<String>>,
    #[serde(default)]
    pub show_creation_status: Option<String>,
    #[serde(default)]
    pub word_number: Option<String>,
    #[serde(default)]
    pub age_gate: Option<String>,
    #[serde(default)]
    pub color_dominate: Option<String>,
}

/// GET /search?query=
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    pub book_id: String,
    pub title: String,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub author: String,
    #[serde(default, rename = "abstract", deserialize_with = "crate::types::null_default")]
    pub abstract_text: String,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub cover: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub read_count: Option<String>,
    #[serde(default)]
    pub age_gate: Option<String>,
}

/// GET /series?series_id=
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesApiResponse {
    #[serde(default)]
    pub series: Option<SeriesMeta>,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesMeta {
    pub series_id: SeriesId,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub series_title: String,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub series_intro: String,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub series_cover: String,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub episode_cnt: u32,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub episode_right_text: String,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub series_play_cnt: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub vid: String,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub vid_index: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "crate::types::null_default")]
    pub disable_play: bool,
}

/// GET /video?video_id=
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoApiResponse {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub main_url: Option<String>,
    #[serde(default)]
    pub backup_url: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl VideoApiResponse {
    /// 优先主地址，没有时退回备用地址
    pub fn play_url(&self) -> Option<&str> {
        self.main_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or(self.backup_url.as_deref().filter(|u| !u.is_empty()))
    }
}

/// GET /account/status?telegram_id=
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountStatus {
    #[serde(default)]
    pub telegram_id: Option<SeriesId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
}

impl AccountStatus {
    pub fn is_vip(&self) -> bool {
        self.status.as_deref() == Some("vip")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmall_tolerates_missing_fields() {
        let empty: BookMallResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.cell.is_none());

        let data: BookMallResponse = serde_json::from_str(
            r#"{"cell": {"name": "Populer", "books": [
                {"book_id": "1", "book_name": "Cinta", "abstract": "...", "thumb_url": "http://img/1.jpg"}
            ]}}"#,
        )
        .unwrap();
        let books = data.cell.and_then(|c| c.books).unwrap();
        assert_eq!(books[0].abstract_text, "...");
        assert_eq!(books[0].author, "");
    }

    #[test]
    fn test_video_play_url_fallback() {
        let video = VideoApiResponse {
            main_url: Some(String::new()),
            backup_url: Some("http://backup/v.mp4".into()),
            ..Default::default()
        };
        assert_eq!(video.play_url(), Some("http://backup/v.mp4"));
        assert_eq!(VideoApiResponse::default().play_url(), None);
    }

    #[test]
    fn test_series_meta_numeric_id() {
        let series: SeriesApiResponse = serde_json::from_str(
            r#"{"series": {"series_id": 7496, "series_title": "Istri", "episode_cnt": 60}}"#,
        )
        .unwrap();
        let meta = series.series.unwrap();
        assert_eq!(meta.series_id.normalized(), "7496");
        assert_eq!(meta.episode_cnt, 60);
        assert!(series.episodes.is_empty());
    }

    #[test]
    fn test_null_fields_read_as_default() {
        let data: BookMallResponse = serde_json::from_str(
            r#"{"cell": {"books": [
                {"book_id": "1", "book_name": "Cinta", "author": null, "abstract": null, "thumb_url": null}
            ]}}"#,
        )
        .unwrap();
        let book = &data.cell.and_then(|c| c.books).unwrap()[0];
        assert_eq!(book.author, "");
        assert_eq!(book.abstract_text, "");
        assert_eq!(book.thumb_url, "");

        let search: SearchResponse = serde_json::from_str(
            r#"{"items": [{"book_id": "2", "title": "Pewaris", "author": null, "cover": null}]}"#,
        )
        .unwrap();
        assert_eq!(search.items.unwrap()[0].cover, "");

        let series: SeriesApiResponse = serde_json::from_str(
            r#"{"series": {"series_id": 1, "series_title": null, "series_intro": null,
                "series_cover": null, "episode_right_text": null, "episode_cnt": null},
                "episodes": null}"#,
        )
        .unwrap();
        let meta = series.series.unwrap();
        assert_eq!(meta.series_intro, "");
        assert_eq!(meta.episode_cnt, 0);
        assert!(series.episodes.is_empty());
    }
}
