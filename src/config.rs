//! 运行配置
//! 全部来自环境变量，未设置时使用内置默认值

use crate::host::{HostBridge, HostUser, NoopHost, StaticHost};
use crate::provider::{
    ProviderId, ProviderRegistry, MELOLO_BASE, NETSHORT_BASE, OTHER_BASE, REELSHORT_BASE,
};
use crate::store::{FileStorage, StorageBackend};
use std::path::PathBuf;
use std::sync::Arc;

const DATA_DIR_FALLBACK: &str = ".dramakita";

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` 表示该提供方未注册
    pub melolo_url: Option<String>,
    pub netshort_url: Option<String>,
    pub reelshort_url: Option<String>,
    pub other_url: Option<String>,
    pub data_dir: PathBuf,
    pub telegram_id: Option<i64>,
    pub telegram_init_data: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // 设置为空串即取消注册该提供方
        let provider_url = |key: &str, default: &str| match lookup(key) {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v.trim().to_string()),
            None => Some(default.to_string()),
        };

        Self {
            melolo_url: provider_url("DRAMAKITA_MELOLO_URL", MELOLO_BASE),
            netshort_url: provider_url("DRAMAKITA_NETSHORT_URL", NETSHORT_BASE),
            reelshort_url: provider_url("DRAMAKITA_REELSHORT_URL", REELSHORT_BASE),
            other_url: provider_url("DRAMAKITA_OTHER_URL", OTHER_BASE),
            data_dir: lookup("DRAMAKITA_DATA_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            telegram_id: lookup("DRAMAKITA_TELEGRAM_ID").and_then(|v| v.trim().parse().ok()),
            telegram_init_data: lookup("DRAMAKITA_TELEGRAM_INIT_DATA").unwrap_or_default(),
        }
    }

    pub fn registry(&self) -> ProviderRegistry {
        [
            (ProviderId::Melolo, &self.melolo_url),
            (ProviderId::Netshort, &self.netshort_url),
            (ProviderId::Reelshort, &self.reelshort_url),
            (ProviderId::Other, &self.other_url),
        ]
        .into_iter()
        .fold(ProviderRegistry::empty(), |registry, (provider, url)| match url {
            Some(url) => registry.with(provider, url.as_str()),
            None => registry,
        })
    }

    pub fn storage(&self) -> Arc<dyn StorageBackend> {
        Arc::new(FileStorage::new(self.data_dir.clone()))
    }

    pub fn host(&self) -> Arc<dyn HostBridge> {
        match self.telegram_id {
            Some(id) => Arc::new(StaticHost::new(
                Some(HostUser {
                    id,
                    first_name: String::new(),
                    last_name: None,
                    username: None,
                    language_code: None,
                }),
                self.telegram_init_data.clone(),
            )),
            None => Arc::new(NoopHost),
        }
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dramakita")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(DATA_DIR_FALLBACK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        let registry = config.registry();
        assert_eq!(registry.base_url(ProviderId::Melolo).unwrap(), MELOLO_BASE);
        assert_eq!(registry.base_url(ProviderId::Netshort).unwrap(), NETSHORT_BASE);
        assert!(config.telegram_id.is_none());
        assert!(config.host().user().is_none());
    }

    #[test]
    fn test_overrides_and_unregister() {
        let config = config(&[
            ("DRAMAKITA_MELOLO_URL", "http://127.0.0.1:9000/"),
            ("DRAMAKITA_REELSHORT_URL", ""),
            ("DRAMAKITA_DATA_DIR", "/tmp/dk"),
            ("DRAMAKITA_TELEGRAM_ID", "12345"),
            ("DRAMAKITA_TELEGRAM_INIT_DATA", "hash=x"),
        ]);
        let registry = config.registry();
        assert_eq!(registry.base_url(ProviderId::Melolo).unwrap(), "http://127.0.0.1:9000");
        assert!(registry.base_url(ProviderId::Reelshort).is_err());
        assert_eq!(config.data_dir, PathBuf::from("/tmp/dk"));

        let host = config.host();
        assert_eq!(host.user().map(|u| u.id), Some(12345));
        assert_eq!(host.init_data(), "hash=x");
    }

    #[test]
    fn test_invalid_telegram_id_is_anonymous() {
        let config = config(&[("DRAMAKITA_TELEGRAM_ID", "budi")]);
        assert!(config.telegram_id.is_none());
    }
}
