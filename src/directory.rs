//! Location directory lookup
//!
//! Resolves a free-text mention against the IPMA location directory,
//! first by exact containment and then by fuzzy similarity. A failed
//! lookup is an expected outcome driving a clarification reply, not an
//! error.

use std::cmp::Reverse;

use strsim::normalized_levenshtein;
use tracing::debug;

use crate::models::Location;

/// Minimum similarity for a fuzzy match to be accepted
pub const FUZZY_THRESHOLD: f64 = 0.6;

/// Find the directory entry best matching the input text, if any.
///
/// Exact containment is checked longest-name-first so that multi-word
/// names beat their own substrings ("Viana do Castelo" over "Castelo");
/// directory order is preserved among names of equal length. When no name
/// is contained in the text, the entire input is compared against every
/// candidate name and the single best match above [`FUZZY_THRESHOLD`]
/// wins, earliest entry first on ties.
#[must_use]
pub fn resolve<'a>(text: &str, directory: &'a [Location]) -> Option<&'a Location> {
    let lower = text.to_lowercase();

    let mut by_length: Vec<&Location> = directory.iter().collect();
    by_length.sort_by_key(|location| Reverse(location.name.len()));

    if let Some(found) = by_length
        .into_iter()
        .find(|location| lower.contains(&location.name.to_lowercase()))
    {
        debug!("Exact containment match: {}", found.name);
        return Some(found);
    }

    let mut best: Option<(&Location, f64)> = None;
    for location in directory {
        let score = normalized_levenshtein(&lower, &location.name.to_lowercase());
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((location, score));
        }
    }

    match best {
        Some((location, score)) if score >= FUZZY_THRESHOLD => {
            debug!("Fuzzy match: {} (similarity {score:.2})", location.name);
            Some(location)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Vec<Location> {
        vec![
            Location::new("Porto", 1131200, 41.158, -8.6294),
            Location::new("Lisboa", 1110600, 38.7167, -9.1333),
            Location::new("Castelo Branco", 1050200, 39.8217, -7.4957),
            Location::new("Viana do Castelo", 1160900, 41.6936, -8.8323),
        ]
    }

    #[test]
    fn test_exact_containment_match() {
        let dir = directory();
        let found = resolve("Qual é o tempo no Porto?", &dir).unwrap();
        assert_eq!(found.name, "Porto");
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let dir = directory();
        let found = resolve("previsão para LISBOA amanhã", &dir).unwrap();
        assert_eq!(found.name, "Lisboa");
    }

    #[test]
    fn test_longest_name_wins_over_substring() {
        let dir = directory();
        // "Viana do Castelo" contains "Castelo"; the longer name must win
        // regardless of directory order.
        let found = resolve("tempo em viana do castelo", &dir).unwrap();
        assert_eq!(found.name, "Viana do Castelo");
    }

    #[test]
    fn test_exact_match_is_deterministic() {
        let dir = directory();
        for _ in 0..10 {
            assert_eq!(resolve("mapa do tempo em lisboa", &dir).unwrap().name, "Lisboa");
        }
    }

    #[test]
    fn test_fuzzy_match_on_typo() {
        let dir = directory();
        let found = resolve("lisbo", &dir).unwrap();
        assert_eq!(found.name, "Lisboa");
    }

    #[test]
    fn test_fuzzy_match_below_threshold_is_none() {
        let dir = directory();
        assert!(resolve("previsão para Xyzzyville", &dir).is_none());
    }

    #[test]
    fn test_empty_directory_is_none() {
        assert!(resolve("tempo no Porto", &[]).is_none());
    }

    #[test]
    fn test_fuzzy_never_returns_below_threshold() {
        let dir = directory();
        for text in ["qwertyuiop", "zzz", "um texto completamente diferente"] {
            if let Some(found) = resolve(text, &dir) {
                let score =
                    normalized_levenshtein(&text.to_lowercase(), &found.name.to_lowercase());
                assert!(score >= FUZZY_THRESHOLD);
            }
        }
    }
}
