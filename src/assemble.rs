//! Response assembly
//!
//! Turns one chat message into the final combination of prose, chart and
//! map artifacts. Branch selection is a pure state machine over the
//! extracted intent flags ([`ResponsePlan::select`]); network side
//! effects happen only after a branch is chosen.

use std::collections::HashMap;

use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

use crate::intent::IntentFlags;
use crate::ipma::{Datasets, IpmaClient};
use crate::models::{DaySummary, Location};
use crate::narrative::{self, NarrativeBackend};
use crate::render;
use crate::{MeteoBotError, Result};

/// Reply for an empty incoming message
pub const APOLOGY_REPLY: &str =
    "Desculpa, não recebi nenhuma mensagem. Podes tentar novamente?";

/// Reply when the message carries no resolvable forecast request
pub const CLARIFY_REPLY: &str =
    "Desculpa, não consegui processar o teu pedido. Podes reformular indicando cidade e o que pretendes?";

/// Lead-in for the all-cities overview
pub const ALL_CITIES_LEAD_IN: &str = "Mapa e gráficos de todas as cidades:";

/// One chart fragment tagged with the location it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct LocationChart {
    pub name: String,
    pub html: String,
}

/// The assembled reply for one chat message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatResponse {
    /// Echo of the user's message
    pub user_message: String,
    /// Prose or fixed lead-in/clarification text
    pub reply: String,
    /// Single-location temperature chart, when requested
    pub chart: Option<String>,
    /// Map fragment (single city or national overview)
    pub map: Option<String>,
    /// Per-location charts for the all-cities branch
    pub location_charts: Option<Vec<LocationChart>>,
}

impl ChatResponse {
    fn text_only(user_message: &str, reply: impl Into<String>) -> Self {
        Self {
            user_message: user_message.to_string(),
            reply: reply.into(),
            ..Self::default()
        }
    }
}

/// The branch a message resolves to, in precedence order
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePlan {
    /// Empty message; answered without touching the network
    Apology,
    /// Overview of every directory location
    AllLocations { with_charts: bool },
    /// No forecast intent, or nothing to resolve against
    Clarify,
    /// Forecast intent with a city mention the directory cannot resolve
    NotFound { mention: String },
    /// Fully resolved single-location request
    Single {
        location: Location,
        with_chart: bool,
        with_map: bool,
    },
}

impl ResponsePlan {
    /// Select the response branch for a message. Pure: no side effects,
    /// deterministic for a fixed directory.
    #[must_use]
    pub fn select(text: &str, flags: &IntentFlags) -> Self {
        if text.trim().is_empty() {
            return Self::Apology;
        }
        if flags.wants_all_locations {
            return Self::AllLocations {
                with_charts: flags.wants_chart,
            };
        }
        if !flags.wants_forecast {
            return Self::Clarify;
        }
        match (&flags.location, &flags.mentioned_city) {
            (Some(location), _) => Self::Single {
                location: location.clone(),
                with_chart: flags.wants_chart,
                with_map: flags.wants_map,
            },
            (None, Some(mention)) => Self::NotFound {
                mention: mention.clone(),
            },
            (None, None) => Self::Clarify,
        }
    }
}

/// Normalize every fetched forecast day against the classification tables.
#[must_use]
pub fn summarize(datasets: &Datasets) -> Vec<DaySummary> {
    datasets
        .forecast
        .iter()
        .map(|day| {
            DaySummary::from_raw(day, &datasets.weather_types, &datasets.precipitation_classes)
        })
        .collect()
}

/// Compose the single-location reply from already-resolved parts.
///
/// Pure: the caller supplies today's summary, the full summary series and
/// the narrative prose; this only decides which fragments to attach.
#[must_use]
pub fn compose_single(
    text: &str,
    location: &Location,
    summaries: &[DaySummary],
    today: &DaySummary,
    prose: String,
    with_chart: bool,
    with_map: bool,
) -> ChatResponse {
    let chart = with_chart.then(|| render::temperature_chart(summaries));
    let map = with_map.then(|| {
        let popup = format!(
            "{} {}, {}°C–{}°C",
            today.emoji, today.weather_description, today.temp_min, today.temp_max
        );
        render::location_map(location.latitude, location.longitude, &popup)
    });

    ChatResponse {
        user_message: text.to_string(),
        reply: prose,
        chart,
        map,
        location_charts: None,
    }
}

/// The intent-to-response pipeline, generic over the narrative backend
pub struct Pipeline<N> {
    ipma: IpmaClient,
    narrative: N,
    fan_out: usize,
}

impl<N: NarrativeBackend> Pipeline<N> {
    pub fn new(ipma: IpmaClient, narrative: N, fan_out: usize) -> Self {
        Self {
            ipma,
            narrative,
            fan_out: fan_out.max(1),
        }
    }

    /// Answer one chat message end to end.
    #[instrument(skip(self))]
    pub async fn respond(&self, text: &str) -> Result<ChatResponse> {
        // The empty-message branch must not trigger any fetch, so it is
        // decided before the directory is loaded for intent extraction.
        if text.trim().is_empty() {
            return Ok(ChatResponse::text_only(text, APOLOGY_REPLY));
        }

        let directory = self.ipma.locations().await?;
        let flags = IntentFlags::extract(text, &directory);
        info!(?flags, "Extracted intent");

        match ResponsePlan::select(text, &flags) {
            ResponsePlan::Apology => Ok(ChatResponse::text_only(text, APOLOGY_REPLY)),
            ResponsePlan::Clarify => Ok(ChatResponse::text_only(text, CLARIFY_REPLY)),
            ResponsePlan::NotFound { mention } => Ok(ChatResponse::text_only(
                text,
                format!("Não encontrei '{mention}'. Podes confirmar o nome?"),
            )),
            ResponsePlan::AllLocations { with_charts } => {
                self.respond_all(text, &directory, with_charts).await
            }
            ResponsePlan::Single {
                location,
                with_chart,
                with_map,
            } => self.respond_single(text, &location, with_chart, with_map).await,
        }
    }

    async fn respond_single(
        &self,
        text: &str,
        location: &Location,
        with_chart: bool,
        with_map: bool,
    ) -> Result<ChatResponse> {
        let datasets = self.ipma.gather(location.global_id).await?;
        let summaries = summarize(&datasets);
        let today = summaries.first().ok_or_else(|| {
            MeteoBotError::upstream(format!("Empty forecast for {}", location.name))
        })?;

        let prompt = narrative::build_prompt(&location.name, today);
        let prose = self.narrative.complete(&prompt).await?;

        Ok(compose_single(
            text, location, &summaries, today, prose, with_chart, with_map,
        ))
    }

    /// Fetch and summarize one location's forecast, logging and skipping
    /// upstream faults. Extracted from `respond_all` so the per-item future
    /// is lifetime-general across the stream borrow.
    async fn gather_summaries(&self, global_id: i64, name: String) -> Option<Vec<DaySummary>> {
        match self.ipma.gather(global_id).await {
            Ok(datasets) => Some(summarize(&datasets)),
            Err(err) => {
                warn!("Skipping {name}: {err}");
                None
            }
        }
    }

    async fn respond_all(
        &self,
        text: &str,
        directory: &[Location],
        with_charts: bool,
    ) -> Result<ChatResponse> {
        // Bounded fan-out; buffered() preserves directory order, which in
        // turn fixes marker and chart-list order.
        let jobs: Vec<(i64, String)> = directory
            .iter()
            .map(|location| (location.global_id, location.name.clone()))
            .collect();
        let gathered: Vec<Option<Vec<DaySummary>>> = stream::iter(jobs)
            .map(|(global_id, name)| self.gather_summaries(global_id, name))
            .buffered(self.fan_out)
            .collect()
            .await;

        let mut today_by_id: HashMap<i64, DaySummary> = HashMap::new();
        let mut location_charts = with_charts.then(Vec::new);

        for (location, summaries) in directory.iter().zip(&gathered) {
            let Some(summaries) = summaries else { continue };
            if let Some(today) = summaries.first() {
                today_by_id.insert(location.global_id, today.clone());
            }
            if let Some(charts) = location_charts.as_mut() {
                charts.push(LocationChart {
                    name: location.name.clone(),
                    html: render::temperature_chart(summaries),
                });
            }
        }

        info!(
            "Aggregated {}/{} locations for the overview",
            today_by_id.len(),
            directory.len()
        );

        Ok(ChatResponse {
            user_message: text.to_string(),
            reply: ALL_CITIES_LEAD_IN.to_string(),
            chart: None,
            map: Some(render::overview_map(directory, &today_by_id)),
            location_charts,
        })
    }
}
