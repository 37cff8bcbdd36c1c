//! The revolver table: every group's game, misfire switch, and timer.
//!
//! All per-group state lives here and is only reached through `&mut self`
//! methods, so a host that owns the table from a single task gets per-group
//! serialization for free. Timer expiries come back through
//! [`RevolverTable::expire`] on that same task.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::GameSettings;
use crate::cylinder::{BulletCount, Cylinder};
use crate::error::{ConfigError, GameError, GameResult, StoreError};
use crate::id::{ActorId, GroupId};
use crate::moderation::MuteRequest;
use crate::outcome::{Loaded, Misfire, Shot, ShotKind, TimeoutNotice};
use crate::store::{SwitchMap, SwitchStore};
use crate::timer::{Expiry, TimerService, TimerTicket};

/// Owns all group games and drives their state machine.
#[derive(Debug)]
pub struct RevolverTable<T, S> {
    settings: GameSettings,
    games: HashMap<GroupId, Cylinder>,
    tickets: HashMap<GroupId, TimerTicket>,
    next_ticket: TimerTicket,
    timers: T,
    switches: SwitchMap,
    store: S,
    rng: StdRng,
}

impl<T: TimerService, S: SwitchStore> RevolverTable<T, S> {
    /// Create a table and load the persisted misfire switches.
    ///
    /// A store that cannot be read is logged and treated as empty.
    pub fn new(settings: GameSettings, timers: T, mut store: S) -> Result<Self, ConfigError> {
        settings.validate()?;
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let switches = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load misfire switches, starting empty");
            SwitchMap::new()
        });
        Ok(Self {
            settings,
            games: HashMap::new(),
            tickets: HashMap::new(),
            next_ticket: TimerTicket::default(),
            timers,
            switches,
            store,
            rng,
        })
    }

    /// The settings this table was built with.
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// The loaded cylinder of `group`, if a game is running.
    pub fn game(&self, group: &GroupId) -> Option<&Cylinder> {
        self.games.get(group)
    }

    /// Number of groups with a running game.
    pub fn active_games(&self) -> usize {
        self.games.len()
    }

    /// The current timer ticket of `group`, if its timer is armed.
    pub fn timer_ticket(&self, group: &GroupId) -> Option<TimerTicket> {
        self.tickets.get(group).copied()
    }

    /// The timer service.
    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Mutable access to the timer service.
    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    /// The switch store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every group's known misfire switch.
    pub fn switches(&self) -> &SwitchMap {
        &self.switches
    }

    /// Whether misfires are on in `group`, falling back to the default.
    pub fn misfire_enabled(&self, group: &GroupId) -> bool {
        self.switches
            .get(group)
            .copied()
            .unwrap_or(self.settings.default_misfire)
    }

    /// Whether `group` has a cylinder with live rounds left.
    pub fn is_loaded(&self, group: &GroupId) -> bool {
        self.games.get(group).is_some_and(|c| !c.is_spent())
    }

    /// Load a fresh cylinder into `group`.
    pub fn load(&mut self, group: &GroupId, bullets: BulletCount) -> GameResult<Loaded> {
        if self.is_loaded(group) {
            return Err(GameError::GameInProgress);
        }
        let cylinder = Cylinder::load(bullets, &mut self.rng);
        self.games.insert(group.clone(), cylinder);
        self.arm_timer(group);
        info!(group = %group, bullets = bullets.get(), "revolver loaded");
        Ok(Loaded {
            group: group.clone(),
            bullets,
        })
    }

    /// Fire the next chamber of `group`'s cylinder at `actor`.
    pub fn shoot(&mut self, group: &GroupId, actor: &ActorId) -> GameResult<Shot> {
        let cylinder = self.games.get_mut(group).ok_or(GameError::NotLoaded)?;
        let fired = cylinder.fire();
        let live_remaining = cylinder.live_rounds();
        let game_over = cylinder.is_spent();

        let kind = if fired.live {
            ShotKind::Hit {
                mute: self.draw_mute(group, actor),
            }
        } else {
            ShotKind::Miss
        };

        if game_over {
            self.clear_game(group, "all live rounds fired");
        } else {
            self.arm_timer(group);
        }

        Ok(Shot {
            group: group.clone(),
            actor: actor.clone(),
            chamber: fired.chamber,
            kind,
            live_remaining,
            game_over,
        })
    }

    /// Turn misfires on or off in `group` and persist the change.
    ///
    /// The new value takes effect even if saving fails.
    pub fn set_misfire_switch(&mut self, group: &GroupId, enabled: bool) -> Result<(), StoreError> {
        self.switches.insert(group.clone(), enabled);
        info!(group = %group, enabled, "misfire switch set");
        self.flush()
    }

    /// Roll for a misfire on an ordinary message from `actor`.
    ///
    /// A group seen for the first time gets the default switch value. With
    /// the switch on, one uniform draw in `[0, 1)` fires when it is at most
    /// `probability`; a probability of zero never fires.
    pub fn check_passive_misfire(
        &mut self,
        group: &GroupId,
        actor: &ActorId,
        probability: f64,
    ) -> Option<Misfire> {
        let default = self.settings.default_misfire;
        let enabled = *self.switches.entry(group.clone()).or_insert(default);
        if !enabled || probability.is_nan() || probability <= 0.0 {
            return None;
        }
        let roll: f64 = self.rng.random();
        if roll > probability {
            return None;
        }
        info!(group = %group, actor = %actor, "misfire");
        Some(Misfire {
            group: group.clone(),
            actor: actor.clone(),
            mute: self.draw_mute(group, actor),
        })
    }

    /// [`check_passive_misfire`](Self::check_passive_misfire) with the
    /// configured probability.
    pub fn on_message(&mut self, group: &GroupId, actor: &ActorId) -> Option<Misfire> {
        let probability = self.settings.misfire_probability;
        self.check_passive_misfire(group, actor, probability)
    }

    /// Clear `group`'s game after inactivity. Does nothing if no game runs.
    pub fn on_timeout(&mut self, group: &GroupId) -> Option<TimeoutNotice> {
        let live_remaining = self.games.get(group)?.live_rounds();
        self.clear_game(group, "timed out");
        Some(TimeoutNotice {
            group: group.clone(),
            live_remaining,
        })
    }

    /// Handle a timer that ran out. Expiries from a replaced or cancelled
    /// arming are ignored.
    pub fn expire(&mut self, expiry: &Expiry) -> Option<TimeoutNotice> {
        if self.tickets.get(&expiry.group) != Some(&expiry.ticket) {
            debug!(group = %expiry.group, "stale timer expiry ignored");
            return None;
        }
        self.tickets.remove(&expiry.group);
        self.timers.cancel(&expiry.group);
        self.on_timeout(&expiry.group)
    }

    /// Write every known switch to the store.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.store.save(&self.switches).inspect_err(|e| {
            warn!(error = %e, "failed to save misfire switches");
        })
    }

    fn draw_mute(&mut self, group: &GroupId, actor: &ActorId) -> MuteRequest {
        MuteRequest::random(
            group.clone(),
            actor.clone(),
            self.settings.min_mute_secs,
            self.settings.max_mute_secs,
            &mut self.rng,
        )
    }

    fn arm_timer(&mut self, group: &GroupId) {
        let ticket = self.next_ticket;
        self.next_ticket = ticket.next();
        self.tickets.insert(group.clone(), ticket);
        self.timers.arm(group, self.settings.timeout(), ticket);
    }

    fn clear_game(&mut self, group: &GroupId, reason: &str) {
        if self.tickets.remove(group).is_some() {
            self.timers.cancel(group);
        }
        if self.games.remove(group).is_some() {
            info!(group = %group, reason, "revolver game cleared");
        }
    }
}
