//! Web layer: chat page and form handler
//!
//! Thin boundary over the pipeline. Expected unresolved-intent outcomes
//! arrive here as complete [`ChatResponse`] values; only true upstream
//! faults surface as an error fragment.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::assemble::{ChatResponse, Pipeline};
use crate::narrative::OllamaClient;

pub struct AppState {
    pub pipeline: Pipeline<OllamaClient>,
}

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub mensagem: String,
}

pub async fn run(state: AppState, port: u16) -> anyhow::Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index))
        .route("/chat", post(chat))
        .nest_service("/static", ServeDir::new("static"))
        .layer(cors)
        .with_state(Arc::new(state));

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server running at http://localhost:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn chat(State(state): State<Arc<AppState>>, Form(form): Form<ChatForm>) -> Response {
    match state.pipeline.respond(&form.mensagem).await {
        Ok(response) => Html(render_response(&response)).into_response(),
        Err(err) => {
            tracing::error!("Chat pipeline failed: {err}");
            (
                StatusCode::BAD_GATEWAY,
                Html(render_error(&form.mensagem, &err.user_message())),
            )
                .into_response()
        }
    }
}

/// Render the assembled response as an HTML fragment for the chat log.
///
/// Prose and names are escaped; chart/map fragments are trusted HTML
/// produced by the renderers.
fn render_response(response: &ChatResponse) -> String {
    let mut html = format!(
        "<div class=\"chat-entry\">\n\
         <p class=\"user\">{}</p>\n\
         <p class=\"bot\">{}</p>\n",
        escape(&response.user_message),
        escape(&response.reply)
    );

    if let Some(chart) = &response.chart {
        html.push_str(chart);
    }
    if let Some(map) = &response.map {
        html.push_str(map);
    }
    if let Some(charts) = &response.location_charts {
        for chart in charts {
            html.push_str(&format!("<h4>{}</h4>\n", escape(&chart.name)));
            html.push_str(&chart.html);
        }
    }

    html.push_str("</div>\n");
    html
}

fn render_error(user_message: &str, reply: &str) -> String {
    format!(
        "<div class=\"chat-entry error\">\n\
         <p class=\"user\">{}</p>\n\
         <p class=\"bot\">{}</p>\n\
         </div>\n",
        escape(user_message),
        escape(reply)
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
