//! What the table reports back to the host after each operation.

use crate::cylinder::BulletCount;
use crate::id::{ActorId, GroupId};
use crate::moderation::MuteRequest;

/// A cylinder was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    /// Group the game belongs to.
    pub group: GroupId,
    /// Live rounds loaded.
    pub bullets: BulletCount,
}

/// Whether a shot hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotKind {
    /// The chamber was live; the shooter is to be muted.
    Hit {
        /// Mute to carry out.
        mute: MuteRequest,
    },
    /// The chamber was empty.
    Miss,
}

/// The result of one pull of the trigger.
///
/// A shot that spends the last live round also ends the game, so the host
/// sees two events: the shot itself and, when `game_over` is set, the end of
/// the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shot {
    /// Group the game belongs to.
    pub group: GroupId,
    /// Who pulled the trigger.
    pub actor: ActorId,
    /// Chamber that was fired.
    pub chamber: usize,
    /// Hit or miss.
    pub kind: ShotKind,
    /// Live rounds left after this shot.
    pub live_remaining: usize,
    /// The last live round was fired and the game is gone.
    pub game_over: bool,
}

impl Shot {
    /// Whether the shot hit.
    pub fn is_hit(&self) -> bool {
        matches!(self.kind, ShotKind::Hit { .. })
    }

    /// The mute requested by a hit.
    pub fn mute(&self) -> Option<&MuteRequest> {
        match &self.kind {
            ShotKind::Hit { mute } => Some(mute),
            ShotKind::Miss => None,
        }
    }
}

/// An ordinary message set off the gun.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misfire {
    /// Group the message was sent in.
    pub group: GroupId,
    /// Sender of the message.
    pub actor: ActorId,
    /// Mute to carry out.
    pub mute: MuteRequest,
}

/// A game was abandoned and cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutNotice {
    /// Group whose game was cleared.
    pub group: GroupId,
    /// Live rounds that were never fired.
    pub live_remaining: usize,
}
