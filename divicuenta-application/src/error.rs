use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read `{key}`: {source}")]
    Read {
        key: String,
        #[source]
        source: BoxError,
    },
    #[error("failed to write `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: BoxError,
    },
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ReceiptOcrError {
    #[error("OCR provider is not configured")]
    NotConfigured,
    #[error("OCR request failed: {source}")]
    Request {
        #[source]
        source: BoxError,
    },
    #[error("OCR provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected OCR response: {detail}")]
    MalformedResponse { detail: String },
}

#[derive(Debug, Error)]
pub enum ReceiptScanError {
    #[error("a receipt scan is already in progress")]
    ScanInProgress,
    #[error("captured image is empty")]
    EmptyImage,
    #[error("no items detected on the receipt")]
    NoItemsDetected,
    #[error(transparent)]
    Provider(#[from] ReceiptOcrError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DinerValidationError {
    #[error("diner name is required")]
    MissingName,
    #[error("an email or phone number is required")]
    MissingContact,
    #[error("email address is malformed")]
    InvalidEmail,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("required field `{field}` is empty")]
    MissingField { field: &'static str },
    #[error("email is already registered")]
    DuplicateEmail,
    #[error("wrong email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Store(#[from] StoreError),
}
