//! Core of the revolver party game for group chats.
//!
//! Each chat group gets its own six-chamber cylinder. Members load it and
//! take turns shooting; a hit asks the platform to mute the shooter. A
//! per-group misfire switch lets ordinary messages occasionally set the gun
//! off, and an inactivity timer clears games nobody finishes.

/// Tunable game settings.
pub mod config;
/// The six-chamber cylinder.
pub mod cylinder;
/// Error types used throughout the crate.
pub mod error;
/// Group and member identifiers.
pub mod id;
/// Mute requests and the platform sink that performs them.
pub mod moderation;
/// Outcome values returned by the table.
pub mod outcome;
/// Durable misfire switch storage.
pub mod store;
/// The per-group state machine.
pub mod table;
/// Per-group inactivity timers.
pub mod timer;

/// Re-export of [`config::GameSettings`].
pub use config::GameSettings;
/// Re-exports of the cylinder types.
pub use cylinder::{BulletCount, CHAMBERS, Cylinder};
/// Re-exports of the error types.
pub use error::{ConfigError, GameError, GameResult, ModerationError, StoreError};
/// Re-exports of the identifier types.
pub use id::{ActorId, GroupId};
/// Re-exports of the moderation types.
pub use moderation::{ModerationSink, MuteRequest, NoModeration};
/// Re-exports of the outcome types.
pub use outcome::{Loaded, Misfire, Shot, ShotKind, TimeoutNotice};
/// Re-exports of the store types.
pub use store::{JsonFileStore, MemoryStore, SwitchMap, SwitchStore};
/// Re-export of [`table::RevolverTable`].
pub use table::RevolverTable;
/// Re-exports of the timer types.
pub use timer::{Expiry, ManualTimers, TimerService, TimerTicket, TokioTimers};
