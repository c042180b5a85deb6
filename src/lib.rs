//! 短剧目录客户端
//! Melolo / Netshort 等上游接口的统一请求封装，以及本地收藏与会员状态

pub mod config;
pub mod error;
pub mod host;
pub mod http_client;
pub mod provider;
pub mod services;
pub mod store;
pub mod types;

pub use config::Config;
pub use error::Error;
pub use http_client::{ApiClient, Method, QueryValue, RequestOptions};
pub use provider::{builtin_registry, ProviderId, ProviderRegistry};

pub type Result<T> = std::result::Result<T, Error>;

use crate::host::HostBridge;
use crate::services::{MeloloService, NetshortService};
use crate::store::{BookmarkStore, MembershipStore, StorageBackend};
use std::sync::Arc;

/// 组装好的客户端: 各服务 + 本地存储 + 宿主能力
#[derive(Clone)]
pub struct Dramakita {
    pub melolo: MeloloService,
    pub netshort: NetshortService,
    pub bookmarks: BookmarkStore,
    pub membership: MembershipStore,
    pub host: Arc<dyn HostBridge>,
}

impl Dramakita {
    pub fn new(api: ApiClient, storage: Arc<dyn StorageBackend>, host: Arc<dyn HostBridge>) -> Self {
        Self {
            melolo: MeloloService::new(api.clone()),
            netshort: NetshortService::new(api),
            bookmarks: BookmarkStore::new(storage.clone()),
            membership: MembershipStore::new(storage),
            host,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ApiClient::new(config.registry()),
            config.storage(),
            config.host(),
        )
    }
}
