use thiserror::Error;

#[derive(Debug, Error)]
pub enum StripeApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid REST request: {0}")]
    RequestError(String),
    #[error("Invalid REST response: {0}")]
    ResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}

/// Reasons an inbound webhook call fails verification. All of these result in the request being rejected before any
/// of the payload is acted upon.
#[derive(Debug, Clone, Error)]
pub enum WebhookError {
    #[error("Signature header is malformed: {0}")]
    MalformedHeader(String),
    #[error("Signature header does not contain a timestamp")]
    MissingTimestamp,
    #[error("Signature header does not contain a v1 signature")]
    MissingSignature,
    #[error("Webhook timestamp is outside the tolerance window")]
    StaleTimestamp,
    #[error("Signature does not match the payload")]
    SignatureMismatch,
    #[error("Payload is not a well-formed event: {0}")]
    InvalidPayload(String),
}

#[derive(Debug, Clone, Error)]
pub enum CartError {
    #[error("Customer record carries no cart metadata")]
    MissingCart,
    #[error("Cart metadata is not valid JSON: {0}")]
    Malformed(String),
}
