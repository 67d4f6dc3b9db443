//! Subject-business recognition over search result names.

/// Returns `true` if `place_name` matches any configured business keyword.
///
/// Matching is case-insensitive substring containment with whitespace-trimmed
/// keywords. This is deliberately a heuristic, not exact identity matching:
/// distinct real-world entities sharing a keyword fragment will collide, and
/// that false-positive source is accepted rather than corrected here.
#[must_use]
pub fn is_subject(place_name: &str, business_keywords: &[String]) -> bool {
    let name = place_name.to_lowercase();
    business_keywords.iter().any(|kw| {
        let kw = kw.trim().to_lowercase();
        !kw.is_empty() && name.contains(&kw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn matches_case_insensitive_substring() {
        assert!(is_subject("ABC Cleaning Co", &kw(&["cleaning"])));
        assert!(is_subject("abc cleaning co", &kw(&["CLEANING"])));
    }

    #[test]
    fn rejects_non_matching_name() {
        assert!(!is_subject("XYZ", &kw(&["cleaning"])));
    }

    #[test]
    fn matches_any_of_several_keywords() {
        assert!(is_subject("Sparkle Maids", &kw(&["cleaning", "sparkle"])));
    }

    #[test]
    fn keywords_are_trimmed() {
        assert!(is_subject("ABC Cleaning Co", &kw(&["  cleaning  "])));
    }

    #[test]
    fn empty_keyword_never_matches() {
        assert!(!is_subject("Anything At All", &kw(&["", "   "])));
    }

    #[test]
    fn empty_keyword_list_never_matches() {
        assert!(!is_subject("Anything At All", &[]));
    }
}
