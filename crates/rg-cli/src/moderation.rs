//! Console stand-in for the chat platform's mute action.

use std::collections::HashSet;

use colored::Colorize;
use rg_core::{ModerationError, ModerationSink, MuteRequest};

/// Prints mutes instead of performing them. Like a real platform, it refuses
/// to mute protected members (group admins).
#[derive(Debug, Clone, Default)]
pub struct ConsoleModeration {
    protected: HashSet<String>,
}

impl ConsoleModeration {
    /// A sink that refuses to mute anyone in `protected`.
    pub fn new(protected: impl IntoIterator<Item = String>) -> Self {
        Self {
            protected: protected.into_iter().collect(),
        }
    }
}

impl ModerationSink for ConsoleModeration {
    async fn mute(&self, request: &MuteRequest) -> Result<(), ModerationError> {
        if self.protected.contains(request.actor.as_str()) {
            return Err(ModerationError::PermissionDenied(request.actor.to_string()));
        }
        println!(
            "[{}] {}",
            request.group,
            format!(
                "* {} is muted for {}s",
                request.actor,
                request.duration.as_secs()
            )
            .dimmed()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use rg_core::{ActorId, GroupId};

    fn request(actor: &str) -> MuteRequest {
        MuteRequest {
            group: GroupId::from("g"),
            actor: ActorId::from(actor),
            duration: Duration::from_secs(60),
        }
    }

    #[tokio::test]
    async fn mutes_regular_members() {
        let sink = ConsoleModeration::new(["admin".to_string()]);
        assert!(sink.mute(&request("alice")).await.is_ok());
    }

    #[tokio::test]
    async fn refuses_protected_members() {
        let sink = ConsoleModeration::new(["admin".to_string()]);
        assert_eq!(
            sink.mute(&request("admin")).await,
            Err(ModerationError::PermissionDenied("admin".to_string()))
        );
    }
}
