use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

const HAPPY_KAOMOJI: &str = "(^///^)";
const SAD_KAOMOJI: &str = "(┬┬﹏┬┬)";

/// Closing line of a command that went through
pub fn success(message: &str) -> String {
    format!(
        "✅ {message} {}",
        HAPPY_KAOMOJI.if_supports_color(Stream::Stdout, |text| text.green())
    )
}

/// Closing line of a command that didn't
pub fn failure(message: &str) -> String {
    format!(
        "❌ {message} {}",
        SAD_KAOMOJI.if_supports_color(Stream::Stdout, |text| text.red())
    )
}

#[inline]
pub fn field(name: &str) -> impl Display + '_ {
    name.if_supports_color(Stream::Stdout, |text| text.bold())
        .to_string()
}
