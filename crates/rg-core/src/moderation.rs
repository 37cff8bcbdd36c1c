//! Mute requests and the sink that carries them out.
//!
//! The table only decides who gets muted and for how long. Performing the
//! mute is the host's job, through a [`ModerationSink`].

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::ModerationError;
use crate::id::{ActorId, GroupId};

/// A request to mute one member of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuteRequest {
    /// Group the member belongs to.
    pub group: GroupId,
    /// Member to mute.
    pub actor: ActorId,
    /// How long the mute lasts.
    pub duration: Duration,
}

impl MuteRequest {
    /// Mute `actor` for a whole number of seconds drawn uniformly from
    /// `min_secs..=max_secs`.
    pub fn random<R: Rng + ?Sized>(
        group: GroupId,
        actor: ActorId,
        min_secs: u64,
        max_secs: u64,
        rng: &mut R,
    ) -> Self {
        let secs = rng.random_range(min_secs..=max_secs.max(min_secs));
        Self {
            group,
            actor,
            duration: Duration::from_secs(secs),
        }
    }
}

/// Performs mutes on the chat platform.
pub trait ModerationSink {
    /// Mute the member named in `request`.
    fn mute(
        &self,
        request: &MuteRequest,
    ) -> impl Future<Output = Result<(), ModerationError>> + Send;
}

/// For platforms that cannot mute. Every request fails with
/// [`ModerationError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModeration;

impl ModerationSink for NoModeration {
    async fn mute(&self, _request: &MuteRequest) -> Result<(), ModerationError> {
        Err(ModerationError::Unsupported)
    }
}
