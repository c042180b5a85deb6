//! 本地持久化
//! 收藏列表与会员状态，底层为可替换的键值存储

mod backend;
mod bookmarks;
mod membership;

pub use backend::{FileStorage, MemoryStorage, NoopStorage, StorageBackend};
pub use bookmarks::{Bookmark, BookmarkStore, BOOKMARKS_KEY};
pub use membership::{Membership, MembershipStatus, MembershipStore, Plan, MEMBERSHIP_KEY};
