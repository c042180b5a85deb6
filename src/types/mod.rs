//! 数据类型定义
//! 上游响应结构 + 前端使用的统一模型

pub mod book;
pub mod melolo;
pub mod netshort;

pub use book::{Book, SearchResult};

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 字段缺失或为 `null` 时都取默认值
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 剧集 ID，上游有时给数字有时给字符串，比较时一律按字符串
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesId {
    Num(i64),
    /// 超出 i64 的整数或小数
    Number(serde_json::Number),
    Text(String),
}

impl SeriesId {
    pub fn normalized(&self) -> String {
        self.to_string()
    }

    pub fn matches(&self, other: &SeriesId) -> bool {
        self.normalized() == other.normalized()
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesId::Num(n) => write!(f, "{}", n),
            SeriesId::Number(n) => write!(f, "{}", n),
            SeriesId::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for SeriesId {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for SeriesId {}

impl From<i64> for SeriesId {
    fn from(n: i64) -> Self {
        SeriesId::Num(n)
    }
}

impl From<&str> for SeriesId {
    fn from(s: &str) -> Self {
        SeriesId::Text(s.to_string())
    }
}

impl From<String> for SeriesId {
    fn from(s: String) -> Self {
        SeriesId::Text(s)
    }
}

impl Default for SeriesId {
    fn default() -> Self {
        SeriesId::Text(String::new())
    }
}
