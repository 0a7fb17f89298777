//! Text formatting modes accepted by `sendMessage`.
//!
//! See <https://core.telegram.org/bots/api#formatting-options>.

pub const MODE_MARKDOWN: &str = "Markdown";
pub const MODE_MARKDOWNV2: &str = "MarkdownV2";
pub const MODE_HTML: &str = "HTML";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseMode {
    /// Legacy Markdown.
    Markdown,
    MarkdownV2,
    Html,
}

impl ParseMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ParseMode::Markdown => MODE_MARKDOWN,
            ParseMode::MarkdownV2 => MODE_MARKDOWNV2,
            ParseMode::Html => MODE_HTML,
        }
    }
}

impl From<ParseMode> for String {
    fn from(mode: ParseMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Escape text for [`ParseMode::Html`].
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape text for [`ParseMode::MarkdownV2`].
pub fn escape_markdown_v2(text: &str) -> String {
    const SPECIAL: &[char] = &[
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
        '\\',
    ];
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
