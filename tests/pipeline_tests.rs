//! Pipeline integration tests
//!
//! Exercises the intent, planning and assembly surface end to end against
//! a fixture directory and fixture datasets, with no network.

use std::collections::HashMap;

use meteobot::assemble::{
    self, ALL_CITIES_LEAD_IN, APOLOGY_REPLY, CLARIFY_REPLY, ResponsePlan, compose_single,
};
use meteobot::intent::IntentFlags;
use meteobot::ipma::Datasets;
use meteobot::models::{DaySummary, Location};
use meteobot::render;

fn directory() -> Vec<Location> {
    vec![
        Location::new("Porto", 1131200, 41.158, -8.6294),
        Location::new("Lisboa", 1110600, 38.7167, -9.1333),
        Location::new("Faro", 1080500, 37.0146, -7.9331),
    ]
}

fn datasets() -> Datasets {
    Datasets {
        locations: directory(),
        forecast: serde_json::from_str(
            r#"[
                {"forecastDate": "2026-08-07", "tMin": "16.2", "tMax": "24.9",
                 "predWindDir": "NW", "idWeatherType": 1, "classPrecInt": "1",
                 "precipitaProb": "12.0"},
                {"forecastDate": "2026-08-08", "tMin": "15.0", "tMax": "23.1",
                 "predWindDir": "N", "idWeatherType": 6, "classPrecInt": "2",
                 "precipitaProb": "75.0"}
            ]"#,
        )
        .unwrap(),
        weather_types: serde_json::from_str(
            r#"[
                {"idWeatherType": 1, "descWeatherTypePT": "Céu limpo"},
                {"idWeatherType": 6, "descWeatherTypePT": "Aguaceiros/chuva"}
            ]"#,
        )
        .unwrap(),
        precipitation_classes: serde_json::from_str(
            r#"[
                {"classPrecInt": "1", "descClassPrecIntPT": "Fraco"},
                {"classPrecInt": "2", "descClassPrecIntPT": "Moderado"}
            ]"#,
        )
        .unwrap(),
    }
}

fn plan_for(text: &str) -> ResponsePlan {
    let flags = IntentFlags::extract(text, &directory());
    ResponsePlan::select(text, &flags)
}

/// A plain forecast question resolves to prose only.
#[test]
fn single_city_question_yields_prose_only() {
    let text = "Qual é o tempo no Porto?";

    let flags = IntentFlags::extract(text, &directory());
    assert_eq!(flags.location.as_ref().unwrap().name, "Porto");
    assert!(flags.wants_forecast);
    assert!(!flags.wants_chart);
    assert!(!flags.wants_map);

    let ResponsePlan::Single {
        location,
        with_chart,
        with_map,
    } = ResponsePlan::select(text, &flags)
    else {
        panic!("expected single-location plan");
    };

    let summaries = assemble::summarize(&datasets());
    let response = compose_single(
        text,
        &location,
        &summaries,
        &summaries[0],
        "Hoje o Porto tem céu limpo.".to_string(),
        with_chart,
        with_map,
    );

    assert_eq!(response.user_message, text);
    assert_eq!(response.reply, "Hoje o Porto tem céu limpo.");
    assert!(response.chart.is_none());
    assert!(response.map.is_none());
    assert!(response.location_charts.is_none());
}

/// A chart-and-map request carries both fragments, map centered on the
/// resolved city.
#[test]
fn chart_and_map_request_yields_both_fragments() {
    let text = "mostra-me o gráfico e o mapa do tempo em Lisboa";

    let ResponsePlan::Single {
        location,
        with_chart,
        with_map,
    } = plan_for(text)
    else {
        panic!("expected single-location plan");
    };
    assert_eq!(location.name, "Lisboa");
    assert!(with_chart);
    assert!(with_map);

    let summaries = assemble::summarize(&datasets());
    let response = compose_single(
        text,
        &location,
        &summaries,
        &summaries[0],
        "Prose.".to_string(),
        with_chart,
        with_map,
    );

    let chart = response.chart.expect("chart fragment");
    assert!(chart.contains("T. Mínima"));
    assert!(chart.contains("T. Máxima"));
    assert!(chart.contains("2026-08-07"));

    let map = response.map.expect("map fragment");
    assert!(map.contains("setView([38.7167, -9.1333], 10)"));
    assert!(map.contains("Céu limpo"));
    assert!(map.contains("16.2°C"));
}

/// Empty input selects the apology branch before any data would be
/// needed.
#[test]
fn empty_message_yields_apology() {
    assert_eq!(plan_for(""), ResponsePlan::Apology);
    assert_eq!(plan_for("   \t"), ResponsePlan::Apology);
    assert!(APOLOGY_REPLY.contains("não recebi nenhuma mensagem"));
}

/// Forecast intent with an unknown city echoes the literal mention back.
#[test]
fn unknown_city_is_echoed_back() {
    match plan_for("previsão para Xyzzyville") {
        ResponsePlan::NotFound { mention } => assert_eq!(mention, "Xyzzyville"),
        plan => panic!("expected NotFound, got {plan:?}"),
    }
}

#[test]
fn no_forecast_intent_clarifies() {
    assert_eq!(plan_for("olá, tudo bem?"), ResponsePlan::Clarify);
    assert!(CLARIFY_REPLY.contains("reformular"));
}

#[test]
fn all_cities_plan_with_and_without_charts() {
    assert_eq!(
        plan_for("tempo em todas as cidades"),
        ResponsePlan::AllLocations { with_charts: false }
    );
    assert_eq!(
        plan_for("gráfico do tempo em todas localidades"),
        ResponsePlan::AllLocations { with_charts: true }
    );
    assert!(ALL_CITIES_LEAD_IN.contains("todas as cidades"));
}

/// The overview map never drops a location: entries whose aggregation
/// failed keep a name-only marker.
#[test]
fn overview_map_marker_count_matches_directory() {
    let dir = directory();
    let summaries = assemble::summarize(&datasets());

    // Only Porto has data; Lisboa and Faro degraded.
    let mut today_by_id = HashMap::new();
    today_by_id.insert(1131200, summaries[0].clone());

    let html = render::overview_map(&dir, &today_by_id);
    assert_eq!(html.matches("L.marker(").count(), dir.len());
    assert!(html.contains("Céu limpo"));
    assert!(html.contains("\"Lisboa\""));
    assert!(html.contains("\"Faro\""));

    // Even with no data at all, every marker survives.
    let html = render::overview_map(&dir, &HashMap::new());
    assert_eq!(html.matches("L.marker(").count(), dir.len());
}

/// Fragments embedded together in one response must not collide.
#[test]
fn fragments_use_fresh_ids() {
    let summaries = assemble::summarize(&datasets());
    let charts: Vec<String> = (0..3)
        .map(|_| render::temperature_chart(&summaries))
        .collect();

    let mut ids: Vec<&str> = charts
        .iter()
        .map(|html| html.split("id=\"").nth(1).unwrap().split('"').next().unwrap())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn normalization_tolerates_degraded_records() {
    let mut data = datasets();
    data.forecast = serde_json::from_str(
        r#"[{"forecastDate": "2026-08-07", "tMin": "16.2", "tMax": "24.9",
             "idWeatherType": 99}]"#,
    )
    .unwrap();

    let summaries = assemble::summarize(&data);
    assert_eq!(summaries[0].weather_description, "Desconhecido");
    assert_eq!(summaries[0].precipitation_description, "Sem dados");
    assert_eq!(summaries[0].precipitation_probability, "0");
    assert_eq!(summaries[0].emoji, "");
}
