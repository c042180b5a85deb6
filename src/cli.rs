use clap::{Parser, Subcommand};
use dramakita::store::Plan;

/// 短剧目录命令行
#[derive(Parser)]
#[command(name = "dramakita")]
#[command(about = "Browse Melolo / Netshort short dramas, bookmarks and membership", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 首页书城
    Home,
    /// 搜索
    Search {
        query: String,
    },
    /// 剧集详情与分集
    Series {
        id: String,
    },
    /// 播放地址
    Video {
        id: String,
    },
    /// 账号状态 (默认使用 DRAMAKITA_TELEGRAM_ID)
    Account {
        #[arg(long)]
        telegram_id: Option<i64>,
    },
    /// Netshort 首页
    NetshortHome {
        #[arg(long)]
        tab_id: Option<String>,
        #[arg(long)]
        offset: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Netshort 分集列表，给出集数时解锁该集
    NetshortEpisodes {
        id: String,
        episode: Option<u32>,
    },
    /// 本地收藏
    Bookmarks {
        #[command(subcommand)]
        action: BookmarkAction,
    },
    /// 本地会员状态
    Membership {
        #[command(subcommand)]
        action: MembershipAction,
    },
}

#[derive(Subcommand)]
pub enum BookmarkAction {
    List,
    /// 拉取剧集详情后加入收藏
    Add { series_id: String },
    Remove { series_id: String },
    Check { series_id: String },
    Clear,
}

#[derive(Subcommand)]
pub enum MembershipAction {
    Show,
    Upgrade { plan: Plan },
    Downgrade,
}
