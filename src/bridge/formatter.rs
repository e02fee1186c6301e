//! Formatting bridged text for Discord.
//!
//! Supports placeholders: %time, %user, %message, %chat

use chrono::Local;

use crate::config::types::BridgeConfig;

/// Discord's per-message limit.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Default format when a player is behind the message.
pub const DEFAULT_ATTRIBUTED_FORMAT: &str = "%message (%user)";

/// Default format for system messages.
pub const DEFAULT_SYSTEM_FORMAT: &str = "%message";

/// Substitutes placeholders in one format string.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    format: String,
}

impl MessageFormatter {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// Substitutes:
    /// - `%time` - Current time (HH:MM:SS)
    /// - `%user` - Subject display name
    /// - `%message` - The message text
    /// - `%chat` - Display name of the in-game chat
    ///
    /// Substitution is a single pass over the format string, so placeholder
    /// text inside a value is never expanded.
    pub fn format(&self, ctx: &FormatContext) -> String {
        let mut out = String::with_capacity(self.format.len() + ctx.message.len());
        let mut rest = self.format.as_str();

        while let Some(idx) = rest.find('%') {
            out.push_str(&rest[..idx]);
            rest = &rest[idx..];

            match PLACEHOLDERS.iter().copied().find(|p| rest.starts_with(*p)) {
                Some(placeholder) => {
                    match placeholder {
                        "%time" => out.push_str(&get_time()),
                        "%user" => out.push_str(&ctx.user),
                        "%chat" => out.push_str(&ctx.chat),
                        _ => out.push_str(&ctx.message),
                    }
                    rest = &rest[placeholder.len()..];
                }
                None => {
                    out.push('%');
                    rest = &rest[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

const PLACEHOLDERS: [&str; 4] = ["%time", "%user", "%chat", "%message"];

/// Values for one formatting pass.
#[derive(Debug, Clone, Default)]
pub struct FormatContext {
    pub user: String,
    pub message: String,
    pub chat: String,
}

impl FormatContext {
    pub fn new(user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            message: message.into(),
            chat: String::new(),
        }
    }

    pub fn with_chat(mut self, chat: impl Into<String>) -> Self {
        self.chat = chat.into();
        self
    }
}

/// Picks the attributed or system format and splits the result for Discord.
#[derive(Debug, Clone)]
pub struct OutboundFormatter {
    attributed: MessageFormatter,
    system: MessageFormatter,
}

impl Default for OutboundFormatter {
    fn default() -> Self {
        Self {
            attributed: MessageFormatter::new(DEFAULT_ATTRIBUTED_FORMAT),
            system: MessageFormatter::new(DEFAULT_SYSTEM_FORMAT),
        }
    }
}

impl OutboundFormatter {
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            attributed: MessageFormatter::new(&config.attributed_format),
            system: MessageFormatter::new(&config.system_format),
        }
    }

    /// Format `text` and split it into Discord-sized chunks.
    pub fn render(&self, text: &str, subject: Option<&str>, chat: &str) -> Vec<String> {
        let formatted = match subject {
            Some(user) => self
                .attributed
                .format(&FormatContext::new(user, text).with_chat(chat)),
            None => self
                .system
                .format(&FormatContext::new("", text).with_chat(chat)),
        };

        split_message(&formatted, DISCORD_MESSAGE_LIMIT)
    }
}

fn get_time() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Last UTF-8 char boundary at or before `byte_index`.
fn floor_char_boundary(s: &str, byte_index: usize) -> usize {
    if byte_index >= s.len() {
        return s.len();
    }
    let mut i = byte_index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Split a message into chunks of at most `max_len` bytes.
///
/// Prefers line breaks, then spaces. Never splits inside a UTF-8 character.
/// Whitespace is only trimmed where a chunk is cut. Blank input yields no
/// chunks.
pub fn split_message(message: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    if message.trim().is_empty() {
        return chunks;
    }
    let mut remaining = message;

    while !remaining.is_empty() {
        if remaining.len() <= max_len {
            chunks.push(remaining.to_string());
            break;
        }

        let split_at = floor_char_boundary(remaining, max_len);

        // max_len smaller than the first character: take one character
        if split_at == 0 {
            let first_char_end = remaining
                .char_indices()
                .nth(1)
                .map(|(i, _)| i)
                .unwrap_or(remaining.len());
            chunks.push(remaining[..first_char_end].to_string());
            remaining = remaining[first_char_end..].trim_start();
            continue;
        }

        let window = &remaining[..split_at];
        match window.rfind('\n').or_else(|| window.rfind(' ')) {
            Some(idx) if idx > 0 => {
                chunks.push(window[..idx].trim_end().to_string());
                remaining = remaining[idx + 1..].trim_start();
            }
            _ => {
                chunks.push(window.to_string());
                remaining = remaining[split_at..].trim_start();
            }
        }
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributed_default() {
        let formatter = OutboundFormatter::default();
        assert_eq!(
            formatter.render("hello", Some("Alice"), "Global"),
            vec!["hello (Alice)"]
        );
    }

    #[test]
    fn test_system_default() {
        let formatter = OutboundFormatter::default();
        assert_eq!(
            formatter.render("Server restarting", None, "Global"),
            vec!["Server restarting"]
        );
    }

    #[test]
    fn test_configured_formats() {
        let formatter = OutboundFormatter::from_config(&BridgeConfig {
            remote_linker: false,
            attributed_format: "[%chat] **%user**: %message".to_string(),
            system_format: "_%message_".to_string(),
        });

        assert_eq!(
            formatter.render("gg", Some("Bob"), "nether"),
            vec!["[nether] **Bob**: gg"]
        );
        assert_eq!(formatter.render("tick", None, "nether"), vec!["_tick_"]);
    }

    #[test]
    fn test_message_placeholder_substituted_last() {
        let formatter = MessageFormatter::new("%user: %message");
        let ctx = FormatContext::new("Alice", "I typed %user literally");
        assert_eq!(formatter.format(&ctx), "Alice: I typed %user literally");
    }

    #[test]
    fn test_placeholders_in_user_name_are_literal() {
        let formatter = OutboundFormatter::default();
        assert_eq!(
            formatter.render("hi", Some("%message"), "Global"),
            vec!["hi (%message)"]
        );

        let formatter = MessageFormatter::new("[%chat] %user: %message");
        let ctx = FormatContext::new("%chat", "%user").with_chat("%time");
        assert_eq!(formatter.format(&ctx), "[%time] %chat: %user");
    }

    #[test]
    fn test_unknown_percent_is_kept() {
        let formatter = MessageFormatter::new("100% %message %");
        let ctx = FormatContext::new("", "done");
        assert_eq!(formatter.format(&ctx), "100% done %");
    }

    #[test]
    fn test_message_whitespace_is_preserved() {
        let formatter = OutboundFormatter::default();
        assert_eq!(
            formatter.render("  > quoted\n", None, "Global"),
            vec!["  > quoted\n"]
        );
    }

    #[test]
    fn test_time_placeholder() {
        let formatter = MessageFormatter::new("[%time] %message");
        let result = formatter.format(&FormatContext::new("", "x"));
        assert_eq!(result.len(), "[00:00:00] x".len());
    }

    #[test]
    fn test_long_message_is_split_under_limit() {
        let text = "word ".repeat(1000);
        let chunks = OutboundFormatter::default().render(&text, None, "Global");

        assert!(chunks.len() >= 3);
        assert!(chunks.iter().all(|c| c.len() <= DISCORD_MESSAGE_LIMIT));
        assert!(chunks.iter().all(|c| !c.starts_with(' ')));
    }

    #[test]
    fn test_split_prefers_newline() {
        let chunks = split_message("first line\nsecond part here", 20);
        assert_eq!(chunks, vec!["first line", "second part here"]);
    }

    #[test]
    fn test_split_hard_without_spaces() {
        let chunks = split_message("abcdefghij", 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_split_multibyte_boundary() {
        // 'ü' is two bytes; a limit of 2 lands inside the second one.
        let chunks = split_message("aüü", 2);
        assert_eq!(chunks, vec!["a", "ü", "ü"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_message("   ", 10).is_empty());
    }
}
