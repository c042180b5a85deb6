//! 本地会员状态 (单条记录)

use super::backend::StorageBackend;
use crate::error::Error;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

pub const MEMBERSHIP_KEY: &str = "dramakita_membership_v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    #[default]
    Free,
    Vip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Weekly,
    Monthly,
    Lifetime,
}

impl Plan {
    /// 到期时间，终身会员没有到期时间
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Plan::Weekly => Some(now + Duration::days(7)),
            Plan::Monthly => Some(next_month(now)),
            Plan::Lifetime => None,
        }
    }
}

/// 月份加一、日期不变；下个月没有这一天时顺延 (1 月 31 日 -> 3 月 3 日)
fn next_month(now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now.date_naive();
    let (year, month) = match date.month() {
        12 => (date.year() + 1, 1),
        m => (date.year(), m + 1),
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first + Duration::days(i64::from(date.day()) - 1))
        .map(|day| Utc.from_utc_datetime(&day.and_time(now.time())))
        .unwrap_or_else(|| now + Duration::days(31))
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Plan::Weekly => "weekly",
            Plan::Monthly => "monthly",
            Plan::Lifetime => "lifetime",
        })
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Plan::Weekly),
            "monthly" => Ok(Plan::Monthly),
            "lifetime" => Ok(Plan::Lifetime),
            other => Err(format!("unknown plan: {} (weekly | monthly | lifetime)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Membership {
    pub status: MembershipStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Membership {
    pub fn free() -> Self {
        Self::default()
    }

    /// VIP 且未过期
    pub fn is_active_vip(&self, now: DateTime<Utc>) -> bool {
        self.status == MembershipStatus::Vip && self.expires_at.map_or(true, |exp| exp > now)
    }
}

/// 会员状态存储
#[derive(Clone)]
pub struct MembershipStore {
    storage: Arc<dyn StorageBackend>,
    key: String,
}

impl MembershipStore {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self::with_key(storage, MEMBERSHIP_KEY)
    }

    pub fn with_key(storage: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// 读取会员状态；不存在、损坏或没有 `status` 字段时视为免费用户
    pub fn load(&self) -> Membership {
        if !self.storage.is_available() {
            return Membership::free();
        }
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Membership::free(),
            Err(e) => {
                warn!("读取会员状态失败 {}: {}", self.key, e);
                return Membership::free();
            }
        };

        let value = match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("会员状态解析失败 {}: {}", self.key, e);
                return Membership::free();
            }
        };
        if !value.get("status").is_some_and(Value::is_string) {
            warn!("会员状态缺少 status 字段: {}", self.key);
            return Membership::free();
        }
        serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("会员状态格式不正确 {}: {}", self.key, e);
            Membership::free()
        })
    }

    pub fn save(&self, membership: &Membership) -> crate::Result<()> {
        if !self.storage.is_available() {
            return Ok(());
        }
        let json = serde_json::to_string(membership).map_err(Error::Encode)?;
        self.storage.set(&self.key, &json)?;
        Ok(())
    }

    pub fn upgrade(&self, plan: Plan) -> crate::Result<Membership> {
        self.upgrade_at(plan, Utc::now())
    }

    /// 以给定时间升级为 VIP
    pub fn upgrade_at(&self, plan: Plan, now: DateTime<Utc>) -> crate::Result<Membership> {
        let membership = Membership {
            status: MembershipStatus::Vip,
            plan: Some(plan),
            started_at: Some(now),
            expires_at: plan.expires_at(now),
        };
        self.save(&membership)?;
        info!("升级为 VIP: {}", plan);
        Ok(membership)
    }

    pub fn downgrade(&self) -> crate::Result<Membership> {
        let membership = Membership::free();
        self.save(&membership)?;
        info!("已恢复为免费用户");
        Ok(membership)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::{MemoryStorage, NoopStorage};
    use chrono::TimeZone;

    fn store() -> (MemoryStorage, MembershipStore) {
        let storage = MemoryStorage::new();
        let store = MembershipStore::new(Arc::new(storage.clone()));
        (storage, store)
    }

    #[test]
    fn test_default_is_free() {
        let (_, store) = store();
        assert_eq!(store.load(), Membership::free());
        assert_eq!(store.load().status, MembershipStatus::Free);
    }

    #[test]
    fn test_corrupted_falls_back_to_free() {
        let (storage, store) = store();
        for raw in ["{oops", "[]", "{}", r#"{"status": 1}"#, r#"{"status": "gold"}"#] {
            storage.set(MEMBERSHIP_KEY, raw).unwrap();
            assert_eq!(store.load(), Membership::free(), "raw = {}", raw);
        }
    }

    #[test]
    fn test_reads_browser_written_record() {
        let (storage, store) = store();
        storage
            .set(
                MEMBERSHIP_KEY,
                r#"{"status":"vip","plan":"lifetime","started_at":"2025-03-01T10:00:00.000Z","expires_at":null}"#,
            )
            .unwrap();
        let m = store.load();
        assert_eq!(m.status, MembershipStatus::Vip);
        assert_eq!(m.plan, Some(Plan::Lifetime));
        assert!(m.expires_at.is_none());
    }

    #[test]
    fn test_upgrade_weekly_is_seven_days() {
        let (_, store) = store();
        let now = Utc.with_ymd_and_hms(2025, 1, 30, 12, 0, 0).unwrap();
        let m = store.upgrade_at(Plan::Weekly, now).unwrap();
        assert_eq!(m.status, MembershipStatus::Vip);
        assert_eq!(m.started_at, Some(now));
        assert_eq!(m.expires_at, Some(now + Duration::days(7)));
        assert_eq!(store.load(), m);
    }

    #[test]
    fn test_upgrade_monthly_adds_calendar_month() {
        let (_, store) = store();
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 8, 30, 0).unwrap();
        let m = store.upgrade_at(Plan::Monthly, now).unwrap();
        assert_eq!(m.expires_at, Some(Utc.with_ymd_and_hms(2025, 4, 15, 8, 30, 0).unwrap()));
    }

    #[test]
    fn test_upgrade_monthly_rolls_over_short_months() {
        let at = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap();
        assert_eq!(Plan::Monthly.expires_at(at(2025, 1, 31)), Some(at(2025, 3, 3)));
        assert_eq!(Plan::Monthly.expires_at(at(2024, 1, 31)), Some(at(2024, 3, 2)));
        assert_eq!(Plan::Monthly.expires_at(at(2025, 12, 20)), Some(at(2026, 1, 20)));
    }

    #[test]
    fn test_upgrade_uses_call_time() {
        let (_, store) = store();
        let m = store.upgrade(Plan::Weekly).unwrap();
        let started = m.started_at.unwrap();
        assert_eq!(m.expires_at.unwrap() - started, Duration::days(7));
    }

    #[test]
    fn test_upgrade_lifetime_has_no_expiry() {
        let (_, store) = store();
        let m = store.upgrade(Plan::Lifetime).unwrap();
        assert_eq!(m.plan, Some(Plan::Lifetime));
        assert!(m.expires_at.is_none());
        assert!(m.is_active_vip(Utc::now() + Duration::days(365 * 50)));
    }

    #[test]
    fn test_downgrade_only_keeps_status() {
        let (storage, store) = store();
        store.upgrade(Plan::Monthly).unwrap();
        let m = store.downgrade().unwrap();
        assert_eq!(m, Membership::free());
        assert_eq!(
            storage.get(MEMBERSHIP_KEY).unwrap().as_deref(),
            Some(r#"{"status":"free"}"#)
        );
    }

    #[test]
    fn test_is_active_vip_respects_expiry() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let weekly = Membership {
            status: MembershipStatus::Vip,
            plan: Some(Plan::Weekly),
            started_at: Some(now),
            expires_at: Plan::Weekly.expires_at(now),
        };
        assert!(weekly.is_active_vip(now + Duration::days(6)));
        assert!(!weekly.is_active_vip(now + Duration::days(8)));
        assert!(!Membership::free().is_active_vip(now));
    }

    #[test]
    fn test_without_storage() {
        let store = MembershipStore::new(Arc::new(NoopStorage));
        let m = store.upgrade(Plan::Weekly).unwrap();
        assert_eq!(m.status, MembershipStatus::Vip);
        assert_eq!(store.load(), Membership::free());
        assert_eq!(store.downgrade().unwrap(), Membership::free());
    }

    /// 有数据但声明不可用的后端
    struct Unavailable(MemoryStorage);

    impl StorageBackend for Unavailable {
        fn is_available(&self) -> bool {
            false
        }

        fn get(&self, key: &str) -> std::io::Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> std::io::Result<()> {
            self.0.remove(key)
        }
    }

    #[test]
    fn test_unavailable_storage_is_never_touched() {
        let storage = MemoryStorage::new();
        storage.set(MEMBERSHIP_KEY, r#"{"status":"vip"}"#).unwrap();
        storage.set(crate::store::BOOKMARKS_KEY, r#"[{"series_id":"1"}]"#).unwrap();
        let backend: Arc<dyn StorageBackend> = Arc::new(Unavailable(storage.clone()));

        let membership = MembershipStore::new(backend.clone());
        assert_eq!(membership.load(), Membership::free());
        membership.downgrade().unwrap();
        assert_eq!(
            storage.get(MEMBERSHIP_KEY).unwrap().as_deref(),
            Some(r#"{"status":"vip"}"#)
        );

        let bookmarks = crate::store::BookmarkStore::new(backend);
        assert!(bookmarks.load().is_empty());
        assert!(!bookmarks.exists(&"1".into()));
        bookmarks.clear().unwrap();
        assert_eq!(
            storage.get(crate::store::BOOKMARKS_KEY).unwrap().as_deref(),
            Some(r#"[{"series_id":"1"}]"#)
        );
    }

    #[test]
    fn test_plan_from_str() {
        assert_eq!("monthly".parse::<Plan>(), Ok(Plan::Monthly));
        assert!("yearly".parse::<Plan>().is_err());
    }
}
