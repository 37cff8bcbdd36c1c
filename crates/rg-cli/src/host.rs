//! Turns chat lines into table operations and table outcomes into replies.

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rg_core::{
    ActorId, BulletCount, Expiry, GameError, GroupId, MuteRequest, RevolverTable, StoreError,
    SwitchStore, TimerService,
};
use tracing::debug;

use crate::dispatch::{ChatLine, Command, classify};
use crate::texts::FlavorTexts;

/// Something the host wants done, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Post `text` to `group`.
    Say {
        /// Target group.
        group: GroupId,
        /// Reply text.
        text: String,
    },
    /// Ask the platform to mute someone.
    Mute {
        /// The mute to perform.
        request: MuteRequest,
        /// Display name for the failure notice.
        nickname: String,
    },
}

/// Mixed into a configured seed so flavor text draws do not mirror the table's.
const TEXT_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Reply posted when the platform refuses a mute.
pub fn mute_failed(nickname: &str) -> String {
    format!("Oops, I don't have permission to mute {nickname}!")
}

/// The chat-facing side of the game.
pub struct Host<T, S> {
    table: RevolverTable<T, S>,
    texts: FlavorTexts,
    rng: StdRng,
    admins: HashSet<String>,
    bot_name: String,
}

impl<T: TimerService, S: SwitchStore> Host<T, S> {
    /// Wrap a table. `admins` may toggle misfires; messages from `bot_name`
    /// are ignored.
    pub fn new(
        table: RevolverTable<T, S>,
        texts: FlavorTexts,
        admins: HashSet<String>,
        bot_name: impl Into<String>,
    ) -> Self {
        let rng = match table.settings().seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ TEXT_SEED_SALT),
            None => StdRng::from_os_rng(),
        };
        Self {
            table,
            texts,
            rng,
            admins,
            bot_name: bot_name.into(),
        }
    }

    /// The underlying table.
    #[cfg(test)]
    pub fn table(&self) -> &RevolverTable<T, S> {
        &self.table
    }

    /// Mutable access to the underlying table.
    #[cfg(test)]
    pub fn table_mut(&mut self) -> &mut RevolverTable<T, S> {
        &mut self.table
    }

    /// Handle one chat message.
    pub fn handle_chat(&mut self, chat: &ChatLine<'_>) -> Vec<Step> {
        if chat.user == self.bot_name {
            return Vec::new();
        }
        let group = GroupId::from(chat.group);
        let actor = ActorId::from(chat.user);
        let nickname = chat.user;

        match classify(chat.text) {
            Command::Load(arg) => self.load(group, nickname, arg),
            Command::Shoot => self.shoot(group, &actor, nickname),
            Command::Misfire(enabled) => self.toggle_misfire(group, nickname, enabled),
            Command::Chat => self.ordinary_message(&group, &actor, nickname),
        }
    }

    /// Handle a timer that ran out.
    pub fn handle_expiry(&mut self, expiry: &Expiry) -> Vec<Step> {
        match self.table.expire(expiry) {
            Some(notice) => vec![say(
                notice.group,
                "Nobody touched the revolver for a while. It has been unloaded.".to_string(),
            )],
            None => Vec::new(),
        }
    }

    /// Save every misfire switch before exiting.
    pub fn shutdown(&mut self) -> Result<(), StoreError> {
        self.table.flush()
    }

    fn load(&mut self, group: GroupId, nickname: &str, arg: Option<&str>) -> Vec<Step> {
        if self.table.is_loaded(&group) {
            return vec![say(group, rejection(&GameError::GameInProgress, nickname))];
        }
        let loaded = arg
            .map(BulletCount::parse)
            .transpose()
            .and_then(|bullets| self.table.load(&group, bullets.unwrap_or_default()));
        let text = match loaded {
            Ok(loaded) => format!(
                "{nickname} loaded {} live round{}. Type /shoot to play!",
                loaded.bullets,
                if loaded.bullets.get() == 1 { "" } else { "s" }
            ),
            Err(e) => rejection(&e, nickname),
        };
        vec![say(group, text)]
    }

    fn shoot(&mut self, group: GroupId, actor: &ActorId, nickname: &str) -> Vec<Step> {
        let shot = match self.table.shoot(&group, actor) {
            Ok(shot) => shot,
            Err(e) => return vec![say(group, rejection(&e, nickname))],
        };

        let mut steps = Vec::new();
        match shot.mute() {
            Some(request) => {
                steps.push(say(group.clone(), self.texts.hit(nickname, &mut self.rng)));
                steps.push(Step::Mute {
                    request: request.clone(),
                    nickname: nickname.to_string(),
                });
            }
            None => steps.push(say(group.clone(), self.texts.miss(nickname, &mut self.rng))),
        }
        if shot.game_over {
            steps.push(say(group, "All live rounds have been fired. Game over.".to_string()));
        }
        steps
    }

    fn toggle_misfire(&mut self, group: GroupId, nickname: &str, enabled: bool) -> Vec<Step> {
        if !self.admins.contains(nickname) {
            return vec![say(group, "Sorry, only group admins can do that.".to_string())];
        }
        if let Err(e) = self.table.set_misfire_switch(&group, enabled) {
            debug!(group = %group, error = %e, "misfire switch kept in memory only");
        }
        let state = if enabled { "on" } else { "off" };
        vec![say(group, format!("Misfires are now {state} in this group!"))]
    }

    fn ordinary_message(&mut self, group: &GroupId, actor: &ActorId, nickname: &str) -> Vec<Step> {
        match self.table.on_message(group, actor) {
            Some(misfire) => vec![
                say(group.clone(), self.texts.misfire(nickname, &mut self.rng)),
                Step::Mute {
                    request: misfire.mute,
                    nickname: nickname.to_string(),
                },
            ],
            None => Vec::new(),
        }
    }
}

fn say(group: GroupId, text: String) -> Step {
    Step::Say { group, text }
}

fn rejection(error: &GameError, nickname: &str) -> String {
    match error {
        GameError::InvalidBulletCount(_) => {
            format!("{nickname}, the number of live rounds must be between 1 and 6.")
        }
        GameError::GameInProgress => {
            format!("{nickname}, the game is not over yet, you cannot reload!")
        }
        GameError::NotLoaded => {
            format!("{nickname}, the revolver is empty. Load it first with /load.")
        }
    }
}
