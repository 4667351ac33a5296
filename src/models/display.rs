/// Width of a title in list views
pub const LIST_TITLE_WIDTH: usize = 25;

/// Width of the plot in the detail view
pub const PLOT_WIDTH: usize = 280;

/// Trims text that does not fit in `space` characters and marks the cut with `...`
pub fn overflow(text: &str, space: usize) -> String {
    if text.chars().count() < space {
        text.to_string()
    } else {
        let mut trimmed: String = text.chars().take(space).collect();
        trimmed.push_str("...");
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(overflow("Heat", 25), "Heat");
    }

    #[test]
    fn test_exact_width_is_trimmed() {
        assert_eq!(overflow("abcde", 5), "abcde...");
    }

    #[test]
    fn test_long_text_trimmed() {
        assert_eq!(
            overflow("The Lord of the Rings: The Fellowship of the Ring", 25),
            "The Lord of the Rings: Th..."
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(overflow("Amélie", 10), "Amélie");
        assert_eq!(overflow("Amélie", 3), "Amé...");
    }
}
