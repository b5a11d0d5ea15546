use std::sync::Arc;

use axum::{Router, response::IntoResponse, routing::get};
use prestigia_contact::{ContactApi, HttpContactApi};

use crate::{
    template::{NotFoundTemplate, Template},
    visitor::SectionRegistry,
};

mod assets;
mod contact;
mod health;

pub use assets::AssetsService;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub sections: SectionRegistry,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> anyhow::Result<Self> {
        let api = HttpContactApi::new(config.contact.endpoint.parse()?);

        Ok(Self::with_api(config, Arc::new(api)))
    }

    pub fn with_api(config: crate::config::Config, api: Arc<dyn ContactApi>) -> Self {
        let sections = SectionRegistry::new(
            api,
            config.contact.clear_after(),
            config.contact.visitor_ttl(),
        );

        Self { config, sections }
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    (
        axum::http::StatusCode::NOT_FOUND,
        template.render(NotFoundTemplate),
    )
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/", get(contact::page))
        .route("/contact", get(contact::page).post(contact::action))
        .route("/contact/status", get(contact::status))
        .route("/contact/go/{affordance}", get(contact::go))
        .fallback(fallback)
        .nest_service("/static", AssetsService::new())
        .with_state(app_state)
}
