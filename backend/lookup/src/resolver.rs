//! Exact-match resolution over parsed candidates.

use kupo_core::{CandidateEntry, Resolution, ResolvedIdentifier};

/// Pick the first candidate whose trimmed display name equals `query`.
///
/// Matching is case-sensitive with no punctuation or width folding. No match,
/// including an empty candidate list, is `NotFound` rather than an error.
pub fn resolve(candidates: &[CandidateEntry], query: &str) -> Resolution {
    candidates
        .iter()
        .find(|c| c.display_name.trim() == query)
        .map(|c| Resolution::Found(ResolvedIdentifier::new(c.identifier.clone())))
        .unwrap_or(Resolution::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> Vec<CandidateEntry> {
        pairs.iter().map(|(name, id)| CandidateEntry::new(*name, *id)).collect()
    }

    #[test]
    fn picks_exact_match_over_prefix_match() {
        let candidates = entries(&[("Alice Smith", "100"), ("Alice Smithson", "200")]);
        assert_eq!(resolve(&candidates, "Alice Smith"), Resolution::Found(ResolvedIdentifier::new("100")));
    }

    #[test]
    fn exact_match_need_not_be_first_candidate() {
        let candidates = entries(&[("Alice Smithson", "200"), ("Alice Smith", "100")]);
        assert_eq!(resolve(&candidates, "Alice Smith").found().unwrap().as_str(), "100");
    }

    #[test]
    fn first_of_several_exact_matches_wins() {
        let candidates = entries(&[("Bob Jones", "1"), ("Bob Jones", "2")]);
        assert_eq!(resolve(&candidates, "Bob Jones").found().unwrap().as_str(), "1");
    }

    #[test]
    fn surrounding_whitespace_in_names_is_ignored() {
        let candidates = entries(&[("  Alice Smith\n", "100")]);
        assert!(resolve(&candidates, "Alice Smith").is_found());
    }

    #[test]
    fn case_and_width_are_significant() {
        let candidates = entries(&[("alice smith", "1"), ("ＡＬＩＣＥ Smith", "2"), ("Alice  Smith", "3")]);
        assert_eq!(resolve(&candidates, "Alice Smith"), Resolution::NotFound);
    }

    #[test]
    fn empty_candidates_are_not_found() {
        assert_eq!(resolve(&[], "Anyone"), Resolution::NotFound);
    }

    #[test]
    fn never_returns_a_non_exact_match() {
        let names = ["Alice", "Alice Smith ", "Alice Smithson", "Smith Alice", "Alice-Smith"];
        let candidates: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, n)| CandidateEntry::new(*n, i.to_string()))
            .collect();
        for query in ["Alice", "Alice Smith", "Alice Smithson", "Nobody"] {
            if let Resolution::Found(id) = resolve(&candidates, query) {
                let hit = candidates.iter().find(|c| c.identifier == id.as_str()).unwrap();
                assert_eq!(hit.display_name.trim(), query);
            }
        }
    }
}
