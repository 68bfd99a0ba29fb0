//! Input sanitation for user-authored text.
//!
//! Everything a user types that ends up stored or broadcast (message content,
//! team names) goes through here first: truncate to the field limit, then
//! strip markup tags and control characters. Nothing that passed this module
//! can contain raw HTML.

pub const MAX_MESSAGE_CHARS: usize = 500;
pub const MAX_TEAM_NAME_CHARS: usize = 50;

/// Truncate to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

/// Strip markup tags and control characters.
///
/// Anything between `<` and the next `>` is dropped, including the brackets.
/// An unterminated `<` drops the rest of the input. Control characters other
/// than newline and tab are removed rather than rejected.
pub fn clean(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;

    for c in input.chars() {
        if in_tag {
            if c == '>' {
                in_tag = false;
            }
            continue;
        }
        match c {
            '<' => in_tag = true,
            '\n' | '\t' => out.push(c),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    out
}

/// Sanitize message content: truncate to 500 chars, then strip.
pub fn clean_message(input: &str) -> String {
    clean(truncate_chars(input, MAX_MESSAGE_CHARS))
}

/// Sanitize a team name: truncate to 50 chars, then strip.
pub fn clean_team_name(input: &str) -> String {
    clean(truncate_chars(input, MAX_TEAM_NAME_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_simple_tags() {
        assert_eq!(clean("<b>hi</b>"), "hi");
        assert_eq!(clean("<script>alert(1)</script>ok"), "alert(1)ok");
        assert_eq!(clean("no markup at all"), "no markup at all");
    }

    #[test]
    fn drops_unterminated_tag() {
        assert_eq!(clean("hello <b unclosed"), "hello ");
    }

    #[test]
    fn keeps_bare_closing_bracket() {
        assert_eq!(clean("a > b"), "a > b");
    }

    #[test]
    fn removes_control_characters() {
        assert_eq!(clean("a\u{7}b\nc\td"), "ab\nc\td");
        assert_eq!(clean("\u{0}\u{1b}[31m"), "[31m");
    }

    #[test]
    fn truncates_on_char_boundary() {
        let input = "é".repeat(600);
        assert_eq!(truncate_chars(&input, 500).chars().count(), 500);
        assert_eq!(truncate_chars("short", 500), "short");
    }

    #[test]
    fn message_never_exceeds_limit_or_contains_tags() {
        let inputs = [
            "x".repeat(10_000),
            format!("{}<b>tail</b>", "y".repeat(499)),
            "<i>".repeat(400),
            "plain".to_string(),
        ];
        for input in &inputs {
            let cleaned = clean_message(input);
            assert!(cleaned.chars().count() <= MAX_MESSAGE_CHARS);
            assert!(!cleaned.contains('<'));
        }
    }

    #[test]
    fn team_name_limit() {
        let cleaned = clean_team_name(&"n".repeat(200));
        assert_eq!(cleaned.chars().count(), MAX_TEAM_NAME_CHARS);
    }
}
