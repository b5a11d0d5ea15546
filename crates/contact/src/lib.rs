//! Headless contact section: the three click-to-contact affordances, the
//! contact form submission state machine and the JSON client used to
//! deliver the form to the contact endpoint.

rust_i18n::i18n!("locales", fallback = "fr");

mod affordance;
mod api;
mod error;
mod form;
mod section;
mod status;

pub use affordance::{Affordance, Navigation};
pub use api::{ApiReply, CONTENT_TYPE_JSON, ContactApi, HttpContactApi, TransportError};
pub use error::{Error, Result};
pub use form::ContactForm;
pub use section::{ContactSection, DEFAULT_CLEAR_AFTER, SectionView};
pub use status::{FailureReason, StatusMessage, Submission, Tone};
