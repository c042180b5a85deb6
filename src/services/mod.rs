//! 各提供方的服务封装
//! 只固定路径和查询参数，结构转换放在 mapping

pub mod mapping;
mod melolo;
mod netshort;

pub use mapping::{format_play_count, proxy_image_url};
pub use melolo::MeloloService;
pub use netshort::{HomeParams, NetshortService, DEFAULT_LIMIT, DEFAULT_OFFSET, DEFAULT_TAB_ID};
