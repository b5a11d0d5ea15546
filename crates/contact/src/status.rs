use strum::{AsRefStr, Display};

/// Where the contact form is in its submission lifecycle.
///
/// Idle -> Submitting -> Succeeded | Failed. A success goes back to idle
/// once its status message has been shown long enough; a failure stays
/// until the next submission.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(FailureReason),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// The endpoint answered with a non-success status and this error text.
    Rejected(String),
    /// The request never completed or its body was not JSON.
    Unreachable,
}

impl Submission {
    pub fn is_loading(&self) -> bool {
        matches!(self, Submission::Submitting)
    }

    pub fn status(&self) -> Option<StatusMessage> {
        match self {
            Submission::Idle | Submission::Submitting => None,
            Submission::Succeeded => Some(StatusMessage::success()),
            Submission::Failed(FailureReason::Rejected(error)) => {
                Some(StatusMessage::rejected(error))
            }
            Submission::Failed(FailureReason::Unreachable) => Some(StatusMessage::server_error()),
        }
    }
}

#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub tone: Tone,
    key: &'static str,
    error: Option<String>,
}

impl StatusMessage {
    fn success() -> Self {
        Self {
            tone: Tone::Success,
            key: "contact.status.success",
            error: None,
        }
    }

    fn rejected(error: &str) -> Self {
        Self {
            tone: Tone::Error,
            key: "contact.status.rejected",
            error: Some(error.to_owned()),
        }
    }

    fn server_error() -> Self {
        Self {
            tone: Tone::Error,
            key: "contact.status.server_error",
            error: None,
        }
    }

    pub fn text(&self, locale: &str) -> String {
        match &self.error {
            Some(error) => rust_i18n::t!(self.key, locale = locale, error = error).to_string(),
            _ => rust_i18n::t!(self.key, locale = locale).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_submitting_is_loading() {
        assert!(Submission::Submitting.is_loading());
        assert!(!Submission::Idle.is_loading());
        assert!(!Submission::Succeeded.is_loading());
        assert!(!Submission::Failed(FailureReason::Unreachable).is_loading());
    }

    #[test]
    fn status_text_is_localized() {
        let success = Submission::Succeeded.status().unwrap();
        assert_eq!(success.tone, Tone::Success);
        assert_eq!(
            success.text("fr"),
            "✓ Message reçu ! Nous vous répondrons bientôt."
        );
        assert_eq!(
            success.text("en"),
            "✓ Message received! We will get back to you soon."
        );

        let rejected = Submission::Failed(FailureReason::Rejected("Email invalide".to_owned()))
            .status()
            .unwrap();
        assert_eq!(rejected.tone, Tone::Error);
        assert_eq!(rejected.text("fr"), "✗ Erreur: Email invalide");

        let unreachable = Submission::Failed(FailureReason::Unreachable)
            .status()
            .unwrap();
        assert_eq!(
            unreachable.text("fr"),
            "✗ Erreur serveur. Veuillez réessayer."
        );
    }

    #[test]
    fn idle_and_submitting_have_no_status() {
        assert_eq!(Submission::Idle.status(), None);
        assert_eq!(Submission::Submitting.status(), None);
    }
}
