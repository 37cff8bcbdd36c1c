//! Parsing console lines into chat messages and game commands.

use std::time::Duration;

/// One line of console input.
#[derive(Debug, Clone, PartialEq)]
pub enum Input<'a> {
    /// A chat message sent by `user` in `group`.
    Chat(ChatLine<'a>),
    /// `:wait <secs>`: let time pass while timers keep running.
    Wait(Duration),
    /// Blank line or `#` comment.
    Skip,
}

/// A chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine<'a> {
    /// Group the message was sent in.
    pub group: &'a str,
    /// Sender, used as both id and display name.
    pub user: &'a str,
    /// Message text.
    pub text: &'a str,
}

/// What a chat message asks of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// `/load [n]`, with the raw count argument if given.
    Load(Option<&'a str>),
    /// `/shoot`.
    Shoot,
    /// `/misfire on|off`.
    Misfire(bool),
    /// Anything else: an ordinary message.
    Chat,
}

/// Parse a console line of the form `<group> <user> <message...>`.
pub fn parse_line(line: &str) -> Result<Input<'_>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(Input::Skip);
    }

    if let Some(rest) = trimmed.strip_prefix(":wait") {
        let secs: f64 = rest
            .trim()
            .parse()
            .map_err(|_| format!("usage: :wait <seconds>, got {:?}", rest.trim()))?;
        return Duration::try_from_secs_f64(secs)
            .map(Input::Wait)
            .map_err(|_| format!("invalid wait duration: {secs}"));
    }

    let (group, rest) = split_word(trimmed);
    let (user, text) = split_word(rest);
    if user.is_empty() || text.is_empty() {
        return Err(format!("expected `<group> <user> <message>`, got {trimmed:?}"));
    }
    Ok(Input::Chat(ChatLine { group, user, text }))
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

/// Classify a chat message.
pub fn classify(text: &str) -> Command<'_> {
    let Some(body) = text.strip_prefix('/') else {
        return Command::Chat;
    };
    let mut words = body.split_whitespace();
    let name = words.next().unwrap_or_default().to_lowercase();
    let arg = words.next();

    match (name.as_str(), arg) {
        ("load" | "装填", arg) => Command::Load(arg),
        ("shoot" | "开枪", None) => Command::Shoot,
        ("misfire", Some(switch)) if switch.eq_ignore_ascii_case("on") => Command::Misfire(true),
        ("misfire", Some(switch)) if switch.eq_ignore_ascii_case("off") => Command::Misfire(false),
        ("走火开", None) => Command::Misfire(true),
        ("走火关", None) => Command::Misfire(false),
        _ => Command::Chat,
    }
}
