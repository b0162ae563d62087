use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use yuletide_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "yuletide", version, about = "Yuletide Christmas countdown CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time remaining until the target
    Countdown {
        /// Count down to Christmas of this year instead of the saved selection
        #[arg(long)]
        year: Option<i32>,
        /// Keep ticking until interrupted
        #[arg(long)]
        watch: bool,
        /// Stop watching after this many ticks
        #[arg(long, requires = "watch")]
        ticks: Option<u64>,
    },
    /// Christmas Eve tree gauge and the hourly ring
    TreeProgress,
    /// Countdown notifications
    Notify {
        #[command(subcommand)]
        action: commands::notify::NotifyAction,
    },
    /// User preferences
    Prefs {
        #[command(subcommand)]
        action: commands::prefs::PrefsAction,
    },
    /// Best mini-game scores
    Scores {
        #[command(subcommand)]
        action: commands::scores::ScoresAction,
    },
    /// Gift planner
    Gifts {
        #[command(subcommand)]
        action: commands::gifts::GiftsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Stateless settings endpoint
    SettingsApi {
        #[command(subcommand)]
        action: commands::settings_api::SettingsApiAction,
    },
    /// Play a mini-game from a scripted input list
    Play(commands::play::PlayArgs),
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(AppConfig::load_or_default().logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Countdown { year, watch, ticks } => commands::countdown::run(year, watch, ticks),
        Commands::TreeProgress => commands::countdown::tree_progress(),
        Commands::Notify { action } => commands::notify::run(action),
        Commands::Prefs { action } => commands::prefs::run(action),
        Commands::Scores { action } => commands::scores::run(action),
        Commands::Gifts { action } => commands::gifts::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::SettingsApi { action } => commands::settings_api::run(action),
        Commands::Play(args) => commands::play::run(args),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "yuletide", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
