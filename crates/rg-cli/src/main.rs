//! Console host for the revolver party game.
//!
//! Reads chat lines of the form `<group> <user> <message>` from stdin and
//! prints the bot's replies, standing in for a chat platform.

mod commands;
mod config;
mod dispatch;
mod host;
mod moderation;
mod texts;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "revolver",
    about = "Revolver — russian roulette for group chats",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play from stdin: one `<group> <user> <message>` per line
    Play {
        /// JSON config file (default: built-in settings)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// File holding the per-group misfire switches
        #[arg(short, long, default_value = "revolver_data.json")]
        data: PathBuf,

        /// RNG seed for reproducible games
        #[arg(short, long)]
        seed: Option<u64>,

        /// Seconds without a load or shot before a game is cleared
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Chance that an ordinary message sets off the gun
        #[arg(short, long)]
        probability: Option<f64>,

        /// Member allowed to toggle misfires (repeatable)
        #[arg(short, long = "admin")]
        admins: Vec<String>,

        /// The bot's own user name; its messages are ignored
        #[arg(long, default_value = "revolver")]
        bot_name: String,

        /// Act as a platform that cannot mute anyone
        #[arg(long)]
        no_mute: bool,
    },

    /// List the stored misfire switches
    Switches {
        /// File holding the per-group misfire switches
        #[arg(short, long, default_value = "revolver_data.json")]
        data: PathBuf,
    },

    /// Print the default config file
    DefaultConfig,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            config,
            data,
            seed,
            timeout,
            probability,
            admins,
            bot_name,
            no_mute,
        } => {
            let overrides = commands::Overrides {
                seed,
                timeout,
                probability,
            };
            commands::load_config(config.as_deref(), &overrides).and_then(|config| {
                commands::play::run(commands::play::PlayOptions {
                    config,
                    data: &data,
                    admins,
                    bot_name,
                    no_mute,
                })
            })
        }
        Commands::Switches { data } => commands::switches::run(&data),
        Commands::DefaultConfig => commands::default_config(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
