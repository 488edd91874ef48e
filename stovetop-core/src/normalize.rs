//! Normalization of the user's ingredient text into the list stored for
//! search.

/// Split the raw prompt on commas, trim each segment and uppercase its first
/// character.
///
/// Only the first character of each trimmed segment changes; the rest keeps
/// its casing. Empty segments stay in the output so positions line up with
/// the input, and duplicates are kept.
pub fn normalize_ingredients(prompt: &str) -> Vec<String> {
    prompt.split(',').map(capitalize_first).collect()
}

fn capitalize_first(segment: &str) -> String {
    let trimmed = segment.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_capitalizes() {
        assert_eq!(
            normalize_ingredients("chicken, Rice ,egg"),
            vec!["Chicken", "Rice", "Egg"]
        );
    }

    #[test]
    fn test_keeps_empty_segments() {
        assert_eq!(
            normalize_ingredients("tomato,,onion"),
            vec!["Tomato", "", "Onion"]
        );
        assert_eq!(normalize_ingredients("garlic,"), vec!["Garlic", ""]);
    }

    #[test]
    fn test_only_first_character_changes() {
        assert_eq!(
            normalize_ingredients("  sweet potato, bBQ sauce"),
            vec!["Sweet potato", "BBQ sauce"]
        );
    }

    #[test]
    fn test_keeps_duplicates_and_order() {
        assert_eq!(
            normalize_ingredients("egg, egg, bacon"),
            vec!["Egg", "Egg", "Bacon"]
        );
    }

    #[test]
    fn test_empty_prompt_is_single_empty_segment() {
        assert_eq!(normalize_ingredients(""), vec![""]);
        assert_eq!(normalize_ingredients("   "), vec![""]);
    }

    #[test]
    fn test_non_ascii_first_character() {
        assert_eq!(normalize_ingredients("éclair"), vec!["Éclair"]);
    }
}
