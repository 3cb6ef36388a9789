//! Scrubs bot tokens, bearer tokens and cookie headers before logging.

use regex::Regex;
use std::sync::LazyLock;

static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[A-Za-z0-9\-\._~+/]+=*").expect("static regex"));
// Discord-style bot token: three base64url segments joined by dots.
static BOT_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_\-]{24,}\.[A-Za-z0-9_\-]{6}\.[A-Za-z0-9_\-]{27,}").expect("static regex")
});
static COOKIE_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(cookie:\s*)[^\r\n]+").expect("static regex"));

pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = BEARER_RE.replace_all(input, "[REDACTED_TOKEN]");
    let redacted = BOT_TOKEN_RE.replace_all(&redacted, "[REDACTED_TOKEN]");
    COOKIE_HEADER_RE.replace_all(&redacted, "${1}[REDACTED_COOKIE]").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_tokens_and_cookie_headers() {
        let raw = "GET /items Cookie: mogboard_language=ja; session=abc auth=Bearer eyJhbGciOiJIUzI1NiJ9";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("session=abc"));
        assert!(!clean.contains("eyJhbGciOiJIUzI1NiJ9"));
        assert!(clean.contains("Cookie: [REDACTED_COOKIE]"));
    }

    #[test]
    fn leaves_plain_text_alone() {
        let raw = "lookup Alice Smith on Gaia";
        assert_eq!(redact_sensitive_data(raw), raw);
    }
}
