/// Generate a URL-friendly slug from a listing name.
///
/// Lowercases and trims, turns whitespace runs into a hyphen, drops anything
/// outside `[a-z0-9-]`, then collapses and trims hyphens. The result may be
/// empty (e.g. `"***"`); callers must treat that as a failure.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();

    let mut hyphenated = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for c in lowered.trim_matches(is_separator).chars() {
        if is_separator(c) {
            if !in_whitespace {
                hyphenated.push('-');
            }
            in_whitespace = true;
        } else {
            hyphenated.push(c);
            in_whitespace = false;
        }
    }

    hyphenated
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Unicode whitespace plus the ASCII information separators U+001C..U+001F
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}
