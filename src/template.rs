use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header::ACCEPT_LANGUAGE, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::{collections::HashMap, convert::Infallible};

pub const DEFAULT_LANGUAGE: &str = "fr";
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["fr", "en"];

pub(crate) mod filters {
    #[askama::filter_fn]
    pub fn t(value: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let preferred_language = askama::get_value::<String>(values, "preferred_language")
            .expect("Unable to get preferred_language from askama::get_value");

        Ok(rust_i18n::t!(value, locale = preferred_language).to_string())
    }
}

/// First language of `Accept-Language` that the site is translated in.
pub fn preferred_language(headers: &HeaderMap) -> String {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .split(',')
        .filter_map(|tag| tag.split(';').next())
        .map(|tag| tag.trim().split('-').next().unwrap_or_default().to_lowercase())
        .find(|lang| SUPPORTED_LANGUAGES.contains(&lang.as_str()))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned())
}

pub struct Template {
    pub preferred_language: String,
}

impl Template {
    fn render_with_values<T: askama::Template>(
        &self,
        template: T,
    ) -> Result<String, askama::Error> {
        let mut values: HashMap<&str, Box<dyn std::any::Any>> = HashMap::new();
        values.insert(
            "preferred_language",
            Box::new(self.preferred_language.to_owned()),
        );

        template.render_with_values(&values)
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match self.render_with_values(template) {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(err = %err, "failed to render template");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template. Error: {err}"),
                )
                    .into_response()
            }
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Template {
            preferred_language: preferred_language(&parts.headers),
        })
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;
