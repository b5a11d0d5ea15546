use std::str::FromStr;

use axum::{
    extract::{Form, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use prestigia_contact::{Affordance, ContactForm, Error, SectionView, Submission};
use serde::Deserialize;
use strum::VariantArray;

use crate::{
    routes::AppState,
    template::{NotFoundTemplate, Template, filters},
    visitor,
};

/// Header sent by the page script when it only wants the form fragment.
pub const FRAGMENT_HEADER: &str = "ts-request";

pub struct StatusView {
    pub tone: String,
    pub text: String,
}

/// What the form partial needs to render.
pub struct FormState {
    pub draft: ContactForm,
    pub status: Option<StatusView>,
    pub loading: bool,
    pub submit_label: String,
    pub clear_after_ms: u64,
}

impl FormState {
    fn new(view: &SectionView, locale: &str, clear_after_ms: u64) -> Self {
        Self {
            draft: view.draft.clone(),
            status: view.status().map(|status| StatusView {
                tone: status.tone.to_string(),
                text: status.text(locale),
            }),
            loading: view.submit_disabled(),
            submit_label: view.submit_label(locale),
            clear_after_ms,
        }
    }
}

/// One click-to-contact card.
pub struct CardView {
    pub slug: String,
    pub title: String,
    pub detail: &'static str,
    pub action: String,
    pub aria_label: String,
}

impl CardView {
    fn new(affordance: &Affordance, locale: &str) -> Self {
        let slug = affordance.to_string();

        Self {
            title: rust_i18n::t!(format!("contact.cards.{slug}.title"), locale = locale).to_string(),
            action: rust_i18n::t!(format!("contact.cards.{slug}.action"), locale = locale)
                .to_string(),
            aria_label: rust_i18n::t!(format!("contact.cards.{slug}.aria"), locale = locale)
                .to_string(),
            detail: affordance.detail(),
            slug,
        }
    }
}

#[derive(askama::Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub cards: Vec<CardView>,
    pub form: FormState,
}

impl ContactTemplate {
    fn new(locale: &str, form: FormState) -> Self {
        Self {
            cards: Affordance::VARIANTS
                .iter()
                .map(|affordance| CardView::new(affordance, locale))
                .collect(),
            form,
        }
    }
}

#[derive(askama::Template)]
#[template(path = "partials/contact-form.html")]
pub struct ContactFormTemplate {
    pub form: FormState,
}

#[derive(askama::Template)]
#[template(path = "partials/contact-status.html")]
pub struct ContactStatusTemplate {
    pub form: FormState,
}

/// What the visitor sees without creating a section for them.
fn current_view(app: &AppState, visitor: &str) -> SectionView {
    app.sections
        .get(visitor)
        .map(|section| section.view())
        .unwrap_or_default()
}

fn form_state(app: &AppState, template: &Template, view: &SectionView) -> FormState {
    FormState::new(
        view,
        &template.preferred_language,
        app.config.contact.clear_after_ms,
    )
}

pub async fn page(
    template: Template,
    jar: CookieJar,
    State(app): State<AppState>,
) -> impl IntoResponse {
    let (jar, visitor) = visitor::identify(jar);

    let form = form_state(&app, &template, &current_view(&app, &visitor));

    (
        jar,
        template.render(ContactTemplate::new(&template.preferred_language, form)),
    )
        .into_response()
}

#[derive(Deserialize)]
pub struct ActionInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

pub async fn action(
    template: Template,
    jar: CookieJar,
    headers: HeaderMap,
    State(app): State<AppState>,
    Form(input): Form<ActionInput>,
) -> impl IntoResponse {
    let (jar, visitor) = visitor::identify(jar);
    let section = app.sections.get_or_create(&visitor);

    let form = ContactForm::new(
        input.name,
        input.email,
        input.phone,
        input.subject,
        input.message,
    );

    let (status, view) = match section.submit(form.clone()).await {
        Ok(_) => (StatusCode::OK, section.view()),
        Err(Error::Busy) => {
            tracing::warn!(visitor = %visitor, "contact form submitted while a submission is in flight");

            // The losing page gets its values back in a form it can send again.
            let view = SectionView {
                submission: Submission::Idle,
                draft: form,
            };

            (StatusCode::CONFLICT, view)
        }
        Err(Error::Validate(err)) => {
            tracing::debug!(visitor = %visitor, err = %err, "contact form missing required fields");

            let mut view = section.view();
            view.draft = form;

            (StatusCode::UNPROCESSABLE_ENTITY, view)
        }
    };

    let form = form_state(&app, &template, &view);

    if headers.contains_key(FRAGMENT_HEADER) {
        return (status, jar, template.render(ContactFormTemplate { form })).into_response();
    }

    (
        status,
        jar,
        template.render(ContactTemplate::new(&template.preferred_language, form)),
    )
        .into_response()
}

pub async fn status(
    template: Template,
    jar: CookieJar,
    State(app): State<AppState>,
) -> impl IntoResponse {
    let (jar, visitor) = visitor::identify(jar);

    let form = form_state(&app, &template, &current_view(&app, &visitor));

    (jar, template.render(ContactStatusTemplate { form })).into_response()
}

pub async fn go(
    template: Template,
    jar: CookieJar,
    State(app): State<AppState>,
    Path(affordance): Path<String>,
) -> impl IntoResponse {
    let Ok(affordance) = Affordance::from_str(&affordance) else {
        return (StatusCode::NOT_FOUND, template.render(NotFoundTemplate)).into_response();
    };

    let navigation = match visitor::current(&jar).and_then(|visitor| app.sections.get(&visitor)) {
        Some(section) => section.activate(affordance),
        None => affordance.navigate(),
    };
    tracing::info!(affordance = %affordance, "contact affordance followed");

    Redirect::to(navigation.uri).into_response()
}
