mod cli;

use clap::Parser;
use cli::{BookmarkAction, Cli, Commands, MembershipAction};
use dramakita::services::HomeParams;
use dramakita::store::Bookmark;
use dramakita::types::SeriesId;
use dramakita::{Config, Dramakita};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志，输出到 stderr，stdout 只留给 JSON 结果
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let app = Dramakita::from_config(&config);
    app.host.init();

    run(&app, cli.command).await
}

async fn run(app: &Dramakita, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Home => print_json(&app.melolo.home_books().await?),
        Commands::Search { query } => {
            info!("🔍 搜索: {}", query);
            print_json(&app.melolo.search_books(&query).await?)
        }
        Commands::Series { id } => print_json(&app.melolo.series(&id).await?),
        Commands::Video { id } => print_json(&app.melolo.video(&id).await?),
        Commands::Account { telegram_id } => {
            let Some(telegram_id) = telegram_id.or_else(|| app.host.user().map(|u| u.id)) else {
                anyhow::bail!("没有 Telegram 用户，请传入 --telegram-id 或设置 DRAMAKITA_TELEGRAM_ID");
            };
            print_json(&app.melolo.account_status(telegram_id).await?)
        }
        Commands::NetshortHome {
            tab_id,
            offset,
            limit,
        } => {
            let params = HomeParams {
                tab_id,
                offset,
                limit,
            };
            print_json(&app.netshort.home(params).await?)
        }
        Commands::NetshortEpisodes { id, episode } => match episode {
            Some(no) => print_json(&app.netshort.unlock_episode(&id, no).await?),
            None => print_json(&app.netshort.episodes(&id).await?),
        },
        Commands::Bookmarks { action } => bookmarks(app, action).await,
        Commands::Membership { action } => membership(app, action),
    }
}

async fn bookmarks(app: &Dramakita, action: BookmarkAction) -> anyhow::Result<()> {
    match action {
        BookmarkAction::List => print_json(&app.bookmarks.load()),
        BookmarkAction::Add { series_id } => {
            let detail = app.melolo.series(&series_id).await?;
            let Some(meta) = detail.series else {
                anyhow::bail!("剧集 {} 没有详情", series_id);
            };
            let bookmark = Bookmark::from_series(&meta, chrono::Utc::now());
            app.bookmarks.upsert(bookmark.clone())?;
            info!("⭐ 已收藏: {}", bookmark.title);
            print_json(&bookmark)
        }
        BookmarkAction::Remove { series_id } => {
            app.bookmarks.remove(&SeriesId::from(series_id))?;
            print_json(&app.bookmarks.load())
        }
        BookmarkAction::Check { series_id } => {
            print_json(&app.bookmarks.exists(&SeriesId::from(series_id)))
        }
        BookmarkAction::Clear => {
            app.bookmarks.clear()?;
            print_json(&app.bookmarks.load())
        }
    }
}

fn membership(app: &Dramakita, action: MembershipAction) -> anyhow::Result<()> {
    match action {
        MembershipAction::Show => print_json(&app.membership.load()),
        MembershipAction::Upgrade { plan } => print_json(&app.membership.upgrade(plan)?),
        MembershipAction::Downgrade => print_json(&app.membership.downgrade()?),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
