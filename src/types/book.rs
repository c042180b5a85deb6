use serde::{Deserialize, Serialize};

/// 前端统一使用的书籍/剧集卡片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: String,
    pub book_name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub thumb_url: String,
    #[serde(default)]
    pub stat_infos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_creation_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_gate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_dominate: Option<String>,
}

/// 搜索结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub books: Vec<Book>,
    pub total: u64,
    pub query: String,
}
