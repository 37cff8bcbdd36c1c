//! Flavor text for shots, misses, and misfires.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::CustomTexts;

/// Placeholder replaced with the actor's display name.
pub const NICKNAME: &str = "{sender_nickname}";

const MISFIRE_DESCRIPTIONS: &[&str] = &[
    "The revolver went off on its own!",
    "A stray round cracks through the chat!",
    "Someone left the safety off!",
];

const USER_REACTIONS: &[&str] = &[
    "{sender_nickname} was hit!",
    "{sender_nickname} took the bullet!",
    "{sender_nickname} never saw it coming!",
];

const TRIGGER_DESCRIPTIONS: &[&str] = &["BANG!", "A deafening shot rings out", "The hammer falls"];

const MISS_MESSAGES: &[&str] = &[
    "Click. {sender_nickname} found an empty chamber.",
    "{sender_nickname} squeezes the trigger... nothing happens.",
    "Click! Lucky you, {sender_nickname}.",
];

/// The four configurable lists of flavor lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorTexts {
    misfire_descriptions: Vec<String>,
    user_reactions: Vec<String>,
    trigger_descriptions: Vec<String>,
    miss_messages: Vec<String>,
}

impl Default for FlavorTexts {
    fn default() -> Self {
        Self {
            misfire_descriptions: owned(MISFIRE_DESCRIPTIONS),
            user_reactions: owned(USER_REACTIONS),
            trigger_descriptions: owned(TRIGGER_DESCRIPTIONS),
            miss_messages: owned(MISS_MESSAGES),
        }
    }
}

impl FlavorTexts {
    /// Built-in lines, replaced list by list with any non-blank custom text.
    pub fn from_custom(custom: &CustomTexts) -> Self {
        let defaults = Self::default();
        Self {
            misfire_descriptions: lines_or(
                &custom.misfire_descriptions,
                defaults.misfire_descriptions,
            ),
            user_reactions: lines_or(&custom.user_reactions, defaults.user_reactions),
            trigger_descriptions: lines_or(
                &custom.trigger_descriptions,
                defaults.trigger_descriptions,
            ),
            miss_messages: lines_or(&custom.miss_messages, defaults.miss_messages),
        }
    }

    /// A live chamber: trigger description followed by the victim's reaction.
    pub fn hit<R: Rng + ?Sized>(&self, nickname: &str, rng: &mut R) -> String {
        let trigger = pick(&self.trigger_descriptions, rng);
        let reaction = pick(&self.user_reactions, rng);
        format!("{trigger}, {}", render(reaction, nickname))
    }

    /// An empty chamber.
    pub fn miss<R: Rng + ?Sized>(&self, nickname: &str, rng: &mut R) -> String {
        render(pick(&self.miss_messages, rng), nickname)
    }

    /// A passive misfire.
    pub fn misfire<R: Rng + ?Sized>(&self, nickname: &str, rng: &mut R) -> String {
        let description = pick(&self.misfire_descriptions, rng);
        let reaction = pick(&self.user_reactions, rng);
        format!("{} {}", render(description, nickname), render(reaction, nickname))
    }
}

/// Substitute the actor's display name into a template.
pub fn render(template: &str, nickname: &str) -> String {
    template.replace(NICKNAME, nickname)
}

fn pick<'a, R: Rng + ?Sized>(lines: &'a [String], rng: &mut R) -> &'a str {
    lines.choose(rng).map(String::as_str).unwrap_or_default()
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

fn lines_or(custom: &str, fallback: Vec<String>) -> Vec<String> {
    let lines: Vec<String> = custom
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    if lines.is_empty() { fallback } else { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn render_substitutes_every_placeholder() {
        assert_eq!(
            render("{sender_nickname}? {sender_nickname}!", "Ann"),
            "Ann? Ann!"
        );
        assert_eq!(render("no placeholder", "Ann"), "no placeholder");
    }

    #[test]
    fn custom_lines_replace_defaults() {
        let custom = CustomTexts {
            miss_messages: "  \nclick for {sender_nickname}\n\n".to_string(),
            ..CustomTexts::default()
        };
        let texts = FlavorTexts::from_custom(&custom);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(texts.miss("Bo", &mut rng), "click for Bo");
        assert_eq!(texts.trigger_descriptions, FlavorTexts::default().trigger_descriptions);
    }

    #[test]
    fn blank_custom_keeps_defaults() {
        let custom = CustomTexts {
            user_reactions: "   ".to_string(),
            ..CustomTexts::default()
        };
        assert_eq!(FlavorTexts::from_custom(&custom), FlavorTexts::default());
    }

    #[test]
    fn hit_and_misfire_layout() {
        let custom = CustomTexts {
            misfire_descriptions: "Oops.".to_string(),
            user_reactions: "{sender_nickname} is down".to_string(),
            trigger_descriptions: "BANG".to_string(),
            miss_messages: String::new(),
        };
        let texts = FlavorTexts::from_custom(&custom);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(texts.hit("Cy", &mut rng), "BANG, Cy is down");
        assert_eq!(texts.misfire("Cy", &mut rng), "Oops. Cy is down");
    }

    #[test]
    fn default_lines_mention_actor() {
        let texts = FlavorTexts::default();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            assert!(texts.miss("Dee", &mut rng).contains("Dee"));
            assert!(texts.hit("Dee", &mut rng).contains("Dee"));
        }
    }
}
