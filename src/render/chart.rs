//! Two-series temperature line chart
//!
//! Produces a Plotly fragment (min/max temperature vs. date) served from
//! the client-side library already loaded by the chat page.

use serde_json::json;

use crate::models::DaySummary;
use crate::render::fragment_id;

/// Render the forecast's temperature range as an embeddable fragment.
///
/// Temperatures that fail to parse become `null` points, which the
/// charting library skips rather than breaking the trace.
#[must_use]
pub fn temperature_chart(days: &[DaySummary]) -> String {
    let id = fragment_id("chart");

    let dates: Vec<String> = days.iter().map(|day| day.date.to_string()).collect();
    let t_min: Vec<Option<f64>> = days.iter().map(|day| day.temp_min.parse().ok()).collect();
    let t_max: Vec<Option<f64>> = days.iter().map(|day| day.temp_max.parse().ok()).collect();

    let traces = json!([
        {
            "x": dates,
            "y": t_min,
            "name": "T. Mínima",
            "mode": "lines+markers",
            "type": "scatter"
        },
        {
            "x": dates,
            "y": t_max,
            "name": "T. Máxima",
            "mode": "lines+markers",
            "type": "scatter"
        }
    ]);
    let layout = json!({
        "title": "Previsão de Temperatura",
        "xaxis": {"title": "Data"},
        "yaxis": {"title": "°C"}
    });

    format!(
        "<div id=\"{id}\" style=\"height:300px;\"></div>\n\
         <script>\n\
           Plotly.newPlot('{id}', {traces}, {layout});\n\
         </script>\n"
    )
}
