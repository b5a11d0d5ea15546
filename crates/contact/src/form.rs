use serde::{Deserialize, Serialize};
use validator::Validate;

/// Values of the contact form, serialized as the JSON body sent to the
/// contact endpoint. A blank phone is sent as `null`.
#[derive(Validate, Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct ContactForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.filter(|phone| !phone.trim().is_empty()),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn phone_value(&self) -> &str {
        self.phone.as_deref().unwrap_or_default()
    }
}
