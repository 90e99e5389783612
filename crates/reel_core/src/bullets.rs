//! Keyword-driven bullet extraction from free-text scripts.

/// Maximum number of bullets produced by [`extract_bullets`].
pub const MAX_BULLETS: usize = 4;

/// Sequencing cues that mark a sentence as a key point.
pub const BULLET_KEYWORDS: [&str; 9] = [
    "first",
    "second",
    "third",
    "next",
    "then",
    "finally",
    "additionally",
    "moreover",
    "furthermore",
];

/// Bullets used when nothing in the script qualifies.
pub const DEFAULT_BULLETS: [&str; 4] = [
    "Personalized learning",
    "Improves engagement",
    "Real-time feedback",
    "Global content scaling",
];

const KEYWORD_MIN_CHARS: usize = 11;
const FALLBACK_MIN_CHARS: usize = 21;
const FALLBACK_MAX_CHARS: usize = 60;
const TRUNCATED_CHARS: usize = 57;
const ELLIPSIS: &str = "...";

/// Derives up to four display bullets from `script`.
///
/// Sentences carrying a sequencing keyword win. If fewer than four of those
/// survive, the keyword pass is discarded and the first long sentences are
/// used instead. The result is never empty.
pub fn extract_bullets(script: &str) -> Vec<String> {
    let sentences: Vec<&str> = script.split(['.', '!', '?']).collect();

    let mut bullets: Vec<String> = sentences
        .iter()
        .filter(|sentence| contains_keyword(sentence))
        .map(|sentence| sentence.trim())
        .filter(|sentence| sentence.chars().count() >= KEYWORD_MIN_CHARS)
        .take(MAX_BULLETS)
        .map(ToOwned::to_owned)
        .collect();

    if bullets.len() < MAX_BULLETS {
        bullets = sentences
            .iter()
            .map(|sentence| sentence.trim())
            .filter(|sentence| sentence.chars().count() >= FALLBACK_MIN_CHARS)
            .take(MAX_BULLETS)
            .map(shorten)
            .collect();
    }

    let bullets: Vec<String> = bullets
        .iter()
        .map(|bullet| capitalize(strip_leading_keyword(bullet).trim()))
        .filter(|bullet| !bullet.is_empty())
        .collect();

    if bullets.is_empty() {
        return DEFAULT_BULLETS.iter().map(|b| (*b).to_string()).collect();
    }
    bullets
}

fn contains_keyword(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    BULLET_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

fn shorten(sentence: &str) -> String {
    if sentence.chars().count() > FALLBACK_MAX_CHARS {
        let mut short: String = sentence.chars().take(TRUNCATED_CHARS).collect();
        short.push_str(ELLIPSIS);
        short
    } else {
        sentence.to_string()
    }
}

/// Removes one leading keyword plus any commas/whitespace after it.
/// Matches on prefix only, so "Thenceforth" loses its "Then".
fn strip_leading_keyword(bullet: &str) -> &str {
    for keyword in BULLET_KEYWORDS {
        let matches = bullet
            .get(..keyword.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword));
        if matches {
            return bullet[keyword.len()..]
                .trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        }
    }
    bullet
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
