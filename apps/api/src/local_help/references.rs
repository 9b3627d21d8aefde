use std::collections::HashSet;

use crate::llm_client::GroundingEntry;
use crate::models::outcome::Reference;

/// Turns raw grounding entries into the reference list shown to the user.
///
/// Entries with a missing or empty title or uri are dropped. The rest are
/// deduplicated by uri: the first entry seen for a uri wins (its title is
/// kept) and first-seen order is preserved.
pub fn collect_references(entries: Vec<GroundingEntry>) -> Vec<Reference> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut references = Vec::new();

    for entry in entries {
        let (Some(title), Some(uri)) = (entry.title, entry.uri) else {
            continue;
        };
        if title.is_empty() || uri.is_empty() {
            continue;
        }
        if seen.insert(uri.clone()) {
            references.push(Reference::new(title, uri));
        }
    }

    references
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uris(refs: &[Reference]) -> Vec<&str> {
        refs.iter().map(|r| r.uri.as_str()).collect()
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        let entries = vec![
            GroundingEntry::new("Alpha", "A"),
            GroundingEntry::new("Beta", "B"),
            GroundingEntry::new("Alpha again", "A"),
            GroundingEntry::new("Gamma", "C"),
            GroundingEntry::new("Beta again", "B"),
        ];
        let refs = collect_references(entries);
        assert_eq!(uris(&refs), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_first_title_wins_for_repeated_uri() {
        let refs = collect_references(vec![
            GroundingEntry::new("PS1", "u1"),
            GroundingEntry::new("PS1-dup", "u1"),
            GroundingEntry::new("PS2", "u2"),
        ]);
        assert_eq!(
            refs,
            vec![Reference::new("PS1", "u1"), Reference::new("PS2", "u2")]
        );
    }

    #[test]
    fn test_incomplete_entries_are_excluded() {
        let refs = collect_references(vec![
            GroundingEntry {
                title: None,
                uri: Some("u1".to_string()),
            },
            GroundingEntry {
                title: Some("No link".to_string()),
                uri: None,
            },
            GroundingEntry::new("", "u3"),
            GroundingEntry::new("Blank link", ""),
            GroundingEntry::new("Hospital", "u5"),
        ]);
        assert_eq!(refs, vec![Reference::new("Hospital", "u5")]);
    }

    #[test]
    fn test_incomplete_entry_does_not_claim_its_uri() {
        // an untitled entry for u1 must not block a later titled one
        let refs = collect_references(vec![
            GroundingEntry {
                title: None,
                uri: Some("u1".to_string()),
            },
            GroundingEntry::new("CSC Center", "u1"),
        ]);
        assert_eq!(refs, vec![Reference::new("CSC Center", "u1")]);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let once = collect_references(vec![
            GroundingEntry::new("a", "1"),
            GroundingEntry::new("b", "1"),
            GroundingEntry::new("c", "2"),
        ]);
        let again = collect_references(
            once.iter()
                .map(|r| GroundingEntry::new(&r.title, &r.uri))
                .collect(),
        );
        assert_eq!(once, again);
    }

    #[test]
    fn test_empty_input() {
        assert!(collect_references(vec![]).is_empty());
    }
}
