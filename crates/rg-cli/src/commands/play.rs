use std::collections::HashSet;
use std::path::Path;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

use rg_core::{
    Expiry, JsonFileStore, ModerationSink, NoModeration, RevolverTable, SwitchStore, TimerService,
    TokioTimers,
};

use crate::dispatch::{Input, parse_line};
use crate::host::{Host, Step, mute_failed};
use crate::moderation::ConsoleModeration;
use crate::texts::FlavorTexts;

/// Options for an interactive session, already merged from file and flags.
pub struct PlayOptions<'a> {
    /// Loaded plugin config with flag overrides applied.
    pub config: crate::config::PluginConfig,
    /// Misfire switch data file.
    pub data: &'a Path,
    /// Members allowed to toggle misfires. They cannot be muted.
    pub admins: Vec<String>,
    /// The bot's own user name; its messages are ignored.
    pub bot_name: String,
    /// Report every mute as unsupported.
    pub no_mute: bool,
}

pub fn run(options: PlayOptions<'_>) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;
    runtime.block_on(play(options))
}

async fn play(options: PlayOptions<'_>) -> Result<(), String> {
    let (timers, expiries) = TokioTimers::new();
    let store = JsonFileStore::new(options.data);
    let table = RevolverTable::new(options.config.game_settings, timers, store)
        .map_err(|e| format!("invalid game settings: {e}"))?;
    let texts = FlavorTexts::from_custom(&options.config.custom_texts);
    let admins: HashSet<String> = options.admins.iter().cloned().collect();
    let host = Host::new(table, texts, admins, options.bot_name);

    if options.no_mute {
        session(host, expiries, &NoModeration).await
    } else {
        session(host, expiries, &ConsoleModeration::new(options.admins)).await
    }
}

/// Read chat lines until EOF, interleaving timer expiries.
async fn session<T, S, M>(
    mut host: Host<T, S>,
    mut expiries: UnboundedReceiver<Expiry>,
    sink: &M,
) -> Result<(), String>
where
    T: TimerService,
    S: SwitchStore,
    M: ModerationSink,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.map_err(|e| e.to_string())? else {
                    break;
                };
                match parse_line(&line) {
                    Ok(Input::Chat(chat)) => {
                        let steps = host.handle_chat(&chat);
                        perform(steps, sink).await;
                    }
                    Ok(Input::Wait(duration)) => {
                        let deadline = tokio::time::sleep(duration);
                        tokio::pin!(deadline);
                        loop {
                            tokio::select! {
                                () = &mut deadline => break,
                                Some(expiry) = expiries.recv() => {
                                    perform(host.handle_expiry(&expiry), sink).await;
                                }
                            }
                        }
                    }
                    Ok(Input::Skip) => {}
                    Err(e) => eprintln!("{}", e.yellow()),
                }
            }
            Some(expiry) = expiries.recv() => {
                perform(host.handle_expiry(&expiry), sink).await;
            }
        }
    }

    host.shutdown()
        .map_err(|e| format!("failed to save misfire switches: {e}"))
}

/// Post replies and carry out mutes in order. A refused mute becomes a
/// notice and never undoes the shot.
async fn perform<M: ModerationSink>(steps: Vec<Step>, sink: &M) {
    for step in steps {
        match step {
            Step::Say { group, text } => println!("[{group}] {text}"),
            Step::Mute { request, nickname } => {
                if let Err(e) = sink.mute(&request).await {
                    warn!(
                        group = %request.group,
                        actor = %request.actor,
                        error = %e,
                        "mute failed"
                    );
                    println!("[{}] {}", request.group, mute_failed(&nickname).yellow());
                }
            }
        }
    }
}
