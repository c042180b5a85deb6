//! 本地收藏列表
//! 每次读写都整体读取、整体覆盖，不做内存缓存
//! 写回时以原始 JSON 为准，解析不了的旧条目原样保留

use super::backend::StorageBackend;
use crate::error::Error;
use crate::types::melolo::SeriesMeta;
use crate::types::{null_default, SeriesId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

pub const BOOKMARKS_KEY: &str = "dramakita_bookmarks_v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub series_id: SeriesId,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub intro: String,
    #[serde(default, deserialize_with = "null_default")]
    pub cover: String,
    #[serde(default, deserialize_with = "null_default")]
    pub episode_count: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub episode_text: String,
    #[serde(default, deserialize_with = "null_default")]
    pub play_count: u64,
    /// 非 RFC 3339 的时间读为 `None`
    #[serde(
        default,
        deserialize_with = "lenient_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub added_at: Option<DateTime<Utc>>,
    /// 旧版本写入的其它字段，原样保留
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

fn lenient_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc)))
}

impl Bookmark {
    pub fn from_series(meta: &SeriesMeta, added_at: DateTime<Utc>) -> Self {
        Self {
            series_id: meta.series_id.clone(),
            title: meta.series_title.clone(),
            intro: meta.series_intro.clone(),
            cover: meta.series_cover.clone(),
            episode_count: meta.episode_cnt,
            episode_text: meta.episode_right_text.clone(),
            play_count: meta.series_play_cnt,
            added_at: Some(added_at),
            extra: Default::default(),
        }
    }
}

/// 原始条目的 `series_id`，没有或类型不对时为 `None`
fn entry_id(entry: &Value) -> Option<SeriesId> {
    entry
        .get("series_id")
        .and_then(|id| SeriesId::deserialize(id).ok())
}

fn entry_matches(entry: &Value, series_id: &SeriesId) -> bool {
    entry_id(entry).is_some_and(|id| id.matches(series_id))
}

/// 收藏列表存储
#[derive(Clone)]
pub struct BookmarkStore {
    storage: Arc<dyn StorageBackend>,
    key: String,
}

impl BookmarkStore {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self::with_key(storage, BOOKMARKS_KEY)
    }

    pub fn with_key(storage: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// 读取原始数组；不存在、不是数组或无法解析时为空
    fn load_raw(&self) -> Vec<Value> {
        if !self.storage.is_available() {
            return Vec::new();
        }
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("读取收藏失败 {}: {}", self.key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                warn!("收藏数据不是数组，已忽略: {}", self.key);
                Vec::new()
            }
            Err(e) => {
                warn!("收藏数据解析失败 {}: {}", self.key, e);
                Vec::new()
            }
        }
    }

    fn save_raw(&self, items: &[Value]) -> crate::Result<()> {
        if !self.storage.is_available() {
            return Ok(());
        }
        let json = serde_json::to_string(items).map_err(Error::Encode)?;
        self.storage.set(&self.key, &json)?;
        Ok(())
    }

    /// 读取全部收藏；不存在或内容损坏时返回空列表
    /// 连 `series_id` 都没有的条目不出现在结果里，但仍留在存储中
    pub fn load(&self) -> Vec<Bookmark> {
        self.load_raw()
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Bookmark>(item) {
                Ok(bookmark) => Some(bookmark),
                Err(e) => {
                    debug!("收藏条目无法解析: {}", e);
                    None
                }
            })
            .collect()
    }

    /// 整体覆盖写入
    pub fn save(&self, list: &[Bookmark]) -> crate::Result<()> {
        let items = list
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::Encode)?;
        self.save_raw(&items)
    }

    /// 已存在则浅合并 (新字段覆盖旧字段)，否则插到最前面；其它条目不动
    pub fn upsert(&self, bookmark: Bookmark) -> crate::Result<()> {
        let mut items = self.load_raw();
        let value = serde_json::to_value(&bookmark).map_err(Error::Encode)?;
        match items
            .iter_mut()
            .find(|entry| entry_matches(entry, &bookmark.series_id))
        {
            Some(existing) => {
                debug!("更新收藏 {}", bookmark.series_id);
                match (existing, value) {
                    (Value::Object(old), Value::Object(new)) => old.extend(new),
                    (existing, value) => *existing = value,
                }
            }
            None => {
                debug!("新增收藏 {}", bookmark.series_id);
                items.insert(0, value);
            }
        }
        self.save_raw(&items)
    }

    pub fn remove(&self, series_id: &SeriesId) -> crate::Result<()> {
        let mut items = self.load_raw();
        let before = items.len();
        items.retain(|entry| !entry_matches(entry, series_id));
        if items.len() == before {
            return Ok(());
        }
        self.save_raw(&items)
    }

    pub fn exists(&self, series_id: &SeriesId) -> bool {
        self.load_raw()
            .iter()
            .any(|entry| entry_matches(entry, series_id))
    }

    pub fn clear(&self) -> crate::Result<()> {
        self.save_raw(&[])
    }
}
