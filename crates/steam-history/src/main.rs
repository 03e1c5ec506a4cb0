use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use steam_history::cli::{commands, Context};
use steam_history::client::api::{DEFAULT_API_BASE, DEFAULT_CDN_BASE};
use steam_history::config::{
    Pacing, DEFAULT_API_DELAY_MS, DEFAULT_BATCH_DELAY_MS, DEFAULT_BATCH_SIZE, DEFAULT_STATE_FILE,
};
use steam_history::sync::{Resume, SyncOptions};

#[derive(Parser)]
#[command(name = "steam-history")]
#[command(author, version, about = "Archive Steam profile, library and achievement history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding history/, covers/ and api/
    #[arg(short, long, global = true, env = "STEAM_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Steam Web API key
    #[arg(long, global = true, env = "STEAM_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// 64-bit Steam ID of the tracked account
    #[arg(long, global = true, env = "STEAM_ID")]
    steam_id: Option<String>,

    /// Delay before every API request, in milliseconds
    #[arg(long, global = true, env = "API_DELAY", default_value_t = DEFAULT_API_DELAY_MS)]
    api_delay: u64,

    #[arg(long, global = true, env = "STEAM_API_BASE", default_value = DEFAULT_API_BASE, hide = true)]
    api_base: String,

    #[arg(long, global = true, env = "STEAM_CDN_BASE", default_value = DEFAULT_CDN_BASE, hide = true)]
    cdn_base: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the player profile
    Profile,
    /// Fetch the owned games list
    Games,
    /// Fetch recently played games
    Recent,
    /// Detect newly added games and download their covers
    CheckNew,
    /// Download missing cover art
    Covers,
    /// Fetch achievements for the whole library in resumable batches
    Achievements {
        /// Titles per checkpointed batch
        #[arg(long, env = "BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Pause between batches, in milliseconds
        #[arg(long, env = "BATCH_DELAY", default_value_t = DEFAULT_BATCH_DELAY_MS)]
        batch_delay: u64,

        /// Continue an interrupted run
        #[arg(long, env = "RESUME", value_parser = BoolishValueParser::new())]
        resume: bool,

        /// Last completed batch (0-based) to resume after; defaults to the saved checkpoint
        #[arg(long, env = "LAST_BATCH")]
        last_batch: Option<usize>,

        /// Checkpoint file, relative to the data directory
        #[arg(long, env = "SYNC_STATE_FILE", default_value = DEFAULT_STATE_FILE)]
        state_file: String,
    },
    /// Refresh achievements of recently played games
    UpdateAchievements,
    /// Generate the static JSON API
    GenerateApi {
        /// Additional output directories
        #[arg(long)]
        mirror: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> steam_history::Result<()> {
    let cli = Cli::parse();
    steam_history::logging::init();

    let mut ctx = Context::new(cli.data_dir);
    ctx.api_key = cli.api_key;
    ctx.steam_id = cli.steam_id;
    ctx.api_base = cli.api_base;
    ctx.cdn_base = cli.cdn_base;
    ctx.pacing = Pacing::from_millis(cli.api_delay, DEFAULT_BATCH_DELAY_MS);

    let result = match cli.command {
        Commands::Profile => commands::fetch_profile(&ctx).await.map(|_| ()),
        Commands::Games => commands::fetch_games(&ctx).await.map(|_| ()),
        Commands::Recent => commands::fetch_recent(&ctx).await.map(|_| ()),
        Commands::CheckNew => commands::check_new(&ctx).await.map(|_| ()),
        Commands::Covers => commands::download_covers(&ctx).await.map(|_| ()),
        Commands::Achievements {
            batch_size,
            batch_delay,
            resume,
            last_batch,
            state_file,
        } => {
            ctx.pacing = Pacing::from_millis(cli.api_delay, batch_delay);
            let opts = SyncOptions {
                batch_size,
                resume: Resume::from_flags(resume, last_batch),
            };
            commands::sync_achievements(&ctx, opts, &state_file)
                .await
                .map(|_| ())
        }
        Commands::UpdateAchievements => commands::update_achievements(&ctx).await.map(|_| ()),
        Commands::GenerateApi { mirror } => commands::generate_api(&ctx, &mirror).map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", steam_history::error::format_user_error(&e));
        std::process::exit(1);
    }

    Ok(())
}
