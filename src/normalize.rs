//! Canonical case forms for free-text car fields.
//!
//! `make`, `model` and `color` are stored title-cased; `vin` is stored
//! upper-cased. Both transforms trim surrounding whitespace first and fold
//! case only for ASCII.

/// Trims the input, lowercases it, then uppercases the first character and
/// every character following a whitespace run. Interior whitespace is kept
/// as-is.
pub fn to_title_case(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut result = String::with_capacity(trimmed.len());
    let mut capitalize_next = true;
    for c in trimmed.chars() {
        if c.is_whitespace() {
            capitalize_next = true;
            result.push(c);
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c.to_ascii_lowercase());
        }
    }
    result
}

/// Trims the input and uppercases every ASCII character.
pub fn to_upper_case(text: &str) -> String {
    text.trim().chars().map(|c| c.to_ascii_uppercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_trims_and_capitalizes_words() {
        assert_eq!(to_title_case("  toYOTA camry "), "Toyota Camry");
        assert_eq!(to_title_case("honda"), "Honda");
        assert_eq!(to_title_case("LAND CRUISER"), "Land Cruiser");
    }

    #[test]
    fn title_case_keeps_interior_whitespace_runs() {
        assert_eq!(to_title_case("grand  cherokee"), "Grand  Cherokee");
        assert_eq!(to_title_case("alfa\tromeo"), "Alfa\tRomeo");
    }

    #[test]
    fn title_case_handles_empty_and_blank_input() {
        assert_eq!(to_title_case(""), "");
        assert_eq!(to_title_case("   \t\n"), "");
    }

    #[test]
    fn title_case_passes_leading_digits_through() {
        assert_eq!(to_title_case("4runner"), "4runner");
        assert_eq!(to_title_case("911 turbo"), "911 Turbo");
    }

    #[test]
    fn upper_case_trims_and_uppercases() {
        assert_eq!(to_upper_case(" 1hgcm82633a123456 "), "1HGCM82633A123456");
        assert_eq!(to_upper_case("wvwzzz"), "WVWZZZ");
    }

    #[test]
    fn upper_case_handles_empty_input() {
        assert_eq!(to_upper_case(""), "");
        assert_eq!(to_upper_case("  "), "");
    }
}
