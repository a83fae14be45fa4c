//! Derived search keywords and tag normalization.
//!
//! `search_keywords` is always recomputed from the text fields of a record at
//! save time; it is never settable from the outside.

const MAX_TAGS: usize = 10;
const MIN_TOKEN_LEN: usize = 3;

/// Split a comma-separated tag string into lowercase tags.
///
/// Tags are trimmed, empty entries are dropped, and the list is capped at 10.
/// Duplicates are kept as-is; only casing is normalized.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .take(MAX_TAGS)
        .collect()
}

/// Compute the derived keyword set for a file record.
///
/// Tokens are drawn from the title, description, tags, the original filename
/// without its extension, the file type, and the category. Everything is
/// lowercased, split on non-alphanumeric boundaries, tokens of length <= 2 are
/// dropped, and the result is deduplicated preserving first-seen order.
pub fn build_search_keywords(
    title: &str,
    description: Option<&str>,
    tags: &[String],
    original_name: &str,
    file_type: &str,
    category: &str,
) -> Vec<String> {
    let stem = original_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(original_name);

    let mut keywords: Vec<String> = Vec::new();
    let mut push_tokens = |text: &str| {
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        {
            if !keywords.iter().any(|existing| existing == token) {
                keywords.push(token.to_string());
            }
        }
    };

    push_tokens(title);
    if let Some(description) = description {
        push_tokens(description);
    }
    for tag in tags {
        push_tokens(tag);
    }
    push_tokens(stem);
    push_tokens(file_type);
    push_tokens(category);

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_lowercased_trimmed_and_capped() {
        assert_eq!(
            normalize_tags(" Beach , SUMMER,, sunset "),
            vec!["beach", "summer", "sunset"]
        );

        let many = (0..15).map(|i| format!("tag{i}")).collect::<Vec<_>>().join(",");
        assert_eq!(normalize_tags(&many).len(), 10);
    }

    #[test]
    fn keywords_drop_short_tokens_and_dedupe() {
        let tags = vec!["beach".to_string()];
        let keywords = build_search_keywords(
            "My Beach Day",
            Some("a day at the beach"),
            &tags,
            "IMG_beach.jpg",
            "image",
            "personal",
        );

        // "my", "a", "at" are too short; "beach" appears once
        assert!(!keywords.iter().any(|k| k == "my" || k == "at"));
        assert_eq!(keywords.iter().filter(|k| *k == "beach").count(), 1);
        assert!(keywords.contains(&"day".to_string()));
        assert!(keywords.contains(&"img".to_string()));
        assert!(keywords.contains(&"image".to_string()));
        assert!(keywords.contains(&"personal".to_string()));
    }

    #[test]
    fn token_length_is_measured_in_characters_not_bytes() {
        // Two CJK characters are 6 UTF-8 bytes but still too short
        let keywords = build_search_keywords("東京 ラーメン屋", None, &[], "f.jpg", "image", "other");
        assert!(!keywords.contains(&"東京".to_string()));
        assert!(keywords.contains(&"ラーメン屋".to_string()));
    }

    #[test]
    fn filename_extension_is_not_tokenized() {
        let keywords = build_search_keywords("t", None, &[], "report.pdf", "document", "work");
        assert!(keywords.contains(&"report".to_string()));
        assert!(!keywords.contains(&"pdf".to_string()));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let tags = vec!["travel".to_string(), "2024".to_string()];
        let first = build_search_keywords(
            "Trip Video",
            Some("mountains and lakes"),
            &tags,
            "trip-final.mp4",
            "video",
            "entertainment",
        );
        let second = build_search_keywords(
            "Trip Video",
            Some("mountains and lakes"),
            &tags,
            "trip-final.mp4",
            "video",
            "entertainment",
        );
        assert_eq!(first, second);
    }
}
