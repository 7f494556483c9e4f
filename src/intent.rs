//! Intent extraction from free-form chat messages
//!
//! Every signal is an independent, case-insensitive test over the raw
//! text; only the city lookup consults external data (the location
//! directory). The set of signals is closed and known at build time, so
//! it is modeled as an enum rather than a table of callables.

use crate::directory;
use crate::models::Location;

/// Keyword-driven intent signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Attach a temperature chart
    Chart,
    /// The message is asking about weather at all
    Forecast,
    /// Attach a map
    Map,
    /// Answer for every directory location at once
    AllLocations,
}

impl Signal {
    pub const ALL: [Signal; 4] = [
        Signal::Chart,
        Signal::Forecast,
        Signal::Map,
        Signal::AllLocations,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Signal::Chart => &["gráfico", "grafico"],
            Signal::Forecast => &["tempo", "previsão"],
            Signal::Map => &["mapa"],
            Signal::AllLocations => &["todas as cidades", "todas localidades", "all cities"],
        }
    }

    /// Case-insensitive substring test against the raw message.
    #[must_use]
    pub fn matches(self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords().iter().any(|keyword| lower.contains(keyword))
    }
}

/// Flags extracted once per incoming message and consumed read-only
#[derive(Debug, Clone, PartialEq)]
pub struct IntentFlags {
    /// Resolved directory entry, when the text names one
    pub location: Option<Location>,
    /// Literal city text the user appears to have attempted, resolved or not
    pub mentioned_city: Option<String>,
    pub wants_chart: bool,
    pub wants_forecast: bool,
    pub wants_map: bool,
    pub wants_all_locations: bool,
}

impl IntentFlags {
    /// Extract all flags from one message.
    ///
    /// The extractions are independent of one another; evaluation order
    /// does not affect the outcome.
    #[must_use]
    pub fn extract(text: &str, locations: &[Location]) -> Self {
        Self {
            location: directory::resolve(text, locations).cloned(),
            mentioned_city: mentioned_city(text),
            wants_chart: Signal::Chart.matches(text),
            wants_forecast: Signal::Forecast.matches(text),
            wants_map: Signal::Map.matches(text),
            wants_all_locations: Signal::AllLocations.matches(text),
        }
    }
}

/// Best-effort recovery of the city the user mentioned, so an unmatched
/// name can be echoed back for confirmation.
///
/// Takes the token run after the last locative preposition, trimmed of
/// punctuation. Heuristic only; callers must tolerate `None`.
fn mentioned_city(text: &str) -> Option<String> {
    const PREPOSITIONS: [&str; 7] = ["em", "no", "na", "para", "de", "do", "da"];
    const ARTICLES: [&str; 4] = ["o", "a", "os", "as"];

    let words: Vec<&str> = text.split_whitespace().collect();
    let index = words
        .iter()
        .rposition(|word| PREPOSITIONS.contains(&word.to_lowercase().as_str()))?;

    let mention = words[index + 1..]
        .iter()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .skip_while(|word| ARTICLES.contains(&word.to_lowercase().as_str()))
        .collect::<Vec<_>>()
        .join(" ");

    (!mention.is_empty()).then_some(mention)
}
