#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a contact form submission is already in flight")]
    Busy,

    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),
}

pub type Result<T> = std::result::Result<T, Error>;
