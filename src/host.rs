//! 宿主环境 (Telegram WebApp) 能力
//! 没有宿主时按普通浏览器模式匿名运行

use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostUser {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

pub trait HostBridge: Send + Sync {
    fn init(&self) {}

    /// 当前用户，匿名时为 `None`
    fn user(&self) -> Option<HostUser>;

    /// 原始 initData，匿名时为空串
    fn init_data(&self) -> String;
}

/// 普通浏览器模式
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl HostBridge for NoopHost {
    fn init(&self) {
        info!("[TelegramApp] WebApp not found, running in normal browser mode");
    }

    fn user(&self) -> Option<HostUser> {
        None
    }

    fn init_data(&self) -> String {
        String::new()
    }
}

/// 由配置显式给出的宿主信息
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    user: Option<HostUser>,
    init_data: String,
}

impl StaticHost {
    pub fn new(user: Option<HostUser>, init_data: impl Into<String>) -> Self {
        Self {
            user,
            init_data: init_data.into(),
        }
    }
}

impl HostBridge for StaticHost {
    fn init(&self) {
        match &self.user {
            Some(user) => info!("[TelegramApp] 已识别用户 {}", user.id),
            None => info!("[TelegramApp] 未提供用户信息，匿名运行"),
        }
    }

    fn user(&self) -> Option<HostUser> {
        self.user.clone()
    }

    fn init_data(&self) -> String {
        self.init_data.clone()
    }
}
