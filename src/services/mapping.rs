//! 上游结构 → 前端模型的映射
//! 所有封面都改走 Melolo 的图片代理，保证图片同源

use crate::types::melolo::{MallBook, SearchItem};
use crate::types::Book;

/// `{base}/proxy-img?url={encoded}`，原地址只编码一次
pub fn proxy_image_url(base: &str, original: &str) -> String {
    format!(
        "{}/proxy-img?url={}",
        base.trim_end_matches('/'),
        urlencoding::encode(original)
    )
}

/// 搜索结果条目 → Book
pub fn map_search_item(proxy_base: &str, item: SearchItem) -> Book {
    Book {
        book_id: item.book_id,
        book_name: item.title,
        author: item.author,
        abstract_text: item.abstract_text,
        thumb_url: proxy_image_url(proxy_base, &item.cover),
        stat_infos: item.status.iter().cloned().collect(),
        show_creation_status: item.status,
        word_number: item.read_count,
        age_gate: item.age_gate,
        color_dominate: None,
    }
}

/// 书城条目 → Book，只替换封面
pub fn map_mall_book(proxy_base: &str, book: MallBook) -> Book {
    Book {
        thumb_url: proxy_image_url(proxy_base, &book.thumb_url),
        book_id: book.book_id,
        book_name: book.book_name,
        author: book.author,
        abstract_text: book.abstract_text,
        stat_infos: book.stat_infos.unwrap_or_default(),
        show_creation_status: book.show_creation_status,
        word_number: book.word_number,
        age_gate: book.age_gate,
        color_dominate: book.color_dominate,
    }
}

/// 播放量按印尼语习惯分组: 1234567 -> "1.234.567"
pub fn format_play_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
