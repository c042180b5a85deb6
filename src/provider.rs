//! 上游提供方注册表
//! 提供方标识 → 基础 URL，客户端生命周期内不可变

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const MELOLO_BASE: &str = "https://melolo-api-one.vercel.app";
pub const NETSHORT_BASE: &str = "https://netshort-api-alpha.vercel.app";
pub const REELSHORT_BASE: &str = "https://example-reelshort-api.com";
pub const OTHER_BASE: &str = "https://example-other-api.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Melolo,
    Netshort,
    Reelshort,
    Other,
}

impl ProviderId {
    pub const ALL: [ProviderId; 4] = [
        ProviderId::Melolo,
        ProviderId::Netshort,
        ProviderId::Reelshort,
        ProviderId::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Melolo => "melolo",
            ProviderId::Netshort => "netshort",
            ProviderId::Reelshort => "reelshort",
            ProviderId::Other => "other",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderId::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::UnknownProvider(s.to_string()))
    }
}

/// 提供方 → 基础 URL 映射表
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    bases: HashMap<ProviderId, String>,
}

impl ProviderRegistry {
    /// 空注册表，任何查询都会失败
    pub fn empty() -> Self {
        Self::default()
    }

    /// 注册 (或替换) 提供方，去掉末尾的 `/`
    pub fn with(mut self, provider: ProviderId, base_url: impl Into<String>) -> Self {
        let base = base_url.into().trim_end_matches('/').to_string();
        self.bases.insert(provider, base);
        self
    }

    pub fn base_url(&self, provider: ProviderId) -> crate::Result<&str> {
        self.bases
            .get(&provider)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownProvider(provider.to_string()))
    }

    /// 按字符串标识解析提供方
    pub fn resolve(&self, name: &str) -> crate::Result<(ProviderId, &str)> {
        let provider = name.parse::<ProviderId>()?;
        Ok((provider, self.base_url(provider)?))
    }

    pub fn providers(&self) -> impl Iterator<Item = (ProviderId, &str)> {
        self.bases.iter().map(|(p, b)| (*p, b.as_str()))
    }
}

/// 内置的提供方地址
pub fn builtin_registry() -> ProviderRegistry {
    ProviderRegistry::empty()
        .with(ProviderId::Melolo, MELOLO_BASE)
        .with(ProviderId::Netshort, NETSHORT_BASE)
        .with(ProviderId::Reelshort, REELSHORT_BASE)
        .with(ProviderId::Other, OTHER_BASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_id() {
        assert_eq!("melolo".parse::<ProviderId>().unwrap(), ProviderId::Melolo);
        assert_eq!("netshort".parse::<ProviderId>().unwrap(), ProviderId::Netshort);
        assert!(matches!(
            "unregistered".parse::<ProviderId>(),
            Err(Error::UnknownProvider(name)) if name == "unregistered"
        ));
    }

    #[test]
    fn test_builtin_registry_resolves_every_provider() {
        let registry = builtin_registry();
        for provider in ProviderId::ALL {
            assert!(registry.base_url(provider).is_ok());
        }
        assert_eq!(registry.base_url(ProviderId::Melolo).unwrap(), MELOLO_BASE);
    }

    #[test]
    fn test_missing_provider_fails() {
        let registry = ProviderRegistry::empty().with(ProviderId::Melolo, "http://a.test/");
        assert_eq!(registry.base_url(ProviderId::Melolo).unwrap(), "http://a.test");
        assert!(matches!(
            registry.base_url(ProviderId::Netshort),
            Err(Error::UnknownProvider(_))
        ));
        assert!(registry.resolve("unregistered").is_err());
    }
}
