#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },

    #[error("unknown timezone: {0}")]
    Timezone(String),

    #[error("invalid time: {0}")]
    InvalidTime(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("slot interval must be greater than zero")]
    InvalidInterval,
}

pub type BookingResult<T> = Result<T, BookingError>;
