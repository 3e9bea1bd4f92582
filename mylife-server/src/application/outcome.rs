use serde::Serialize;

pub(crate) const POST_NOT_FOUND: &str = "Post not found";
pub(crate) const PROFILE_NOT_FOUND: &str = "Profile not found";
pub(crate) const ONLY_CREATOR_CAN_UPDATE: &str = "Only post creator can update the post.";
pub(crate) const ONLY_CREATOR_CAN_DELETE: &str = "Only post creator can delete the post.";
pub(crate) const VALIDATION_FAILED: &str = "validation failed";

/// Result of a use case. Business failures are data here; infrastructure
/// failures travel separately as `Err(DomainError)`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outcome<T> {
    Ok(T),
    Created(T),
    Updated(T),
    Deleted,
    NotFound(&'static str),
    Forbidden(&'static str),
    /// Per-field failures, each `"field: reason"`.
    Invalid(Vec<String>),
}

impl<T> Outcome<T> {
    pub(crate) fn status_code(&self) -> u16 {
        match self {
            Outcome::Ok(_) | Outcome::Updated(_) | Outcome::Deleted => 200,
            Outcome::Created(_) => 201,
            Outcome::Invalid(_) => 400,
            Outcome::Forbidden(_) => 403,
            Outcome::NotFound(_) => 404,
        }
    }

    pub(crate) fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Ok(_) | Outcome::Created(_) | Outcome::Updated(_) | Outcome::Deleted
        )
    }

    pub(crate) fn into_envelope(self) -> Envelope<T> {
        let status_code = self.status_code();
        let (message, payload) = match self {
            Outcome::Ok(payload) => ("Success".to_string(), Some(payload)),
            Outcome::Created(payload) => ("Post successfully created.".to_string(), Some(payload)),
            Outcome::Updated(payload) => ("Post Successfully Updated".to_string(), Some(payload)),
            Outcome::Deleted => ("Post successfully deleted.".to_string(), None),
            Outcome::NotFound(message) | Outcome::Forbidden(message) => {
                (message.to_string(), None)
            }
            Outcome::Invalid(errors) => {
                return Envelope::new(VALIDATION_FAILED.to_string(), status_code, None)
                    .with_errors(errors);
            }
        };

        Envelope::new(message, status_code, payload)
    }
}

/// Uniform response shape: `{message, isSuccess, statusCode, errors?, ..payload}`.
///
/// `isSuccess` is derived from `statusCode`, so the pair cannot disagree.
/// `errors` is omitted when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Envelope<T> {
    message: String,
    is_success: bool,
    status_code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
    #[serde(flatten)]
    payload: Option<T>,
}

impl<T> Envelope<T> {
    fn new(message: String, status_code: u16, payload: Option<T>) -> Self {
        Self {
            message,
            is_success: (200..300).contains(&status_code),
            status_code,
            errors: Vec::new(),
            payload,
        }
    }

    pub(crate) fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn is_success(&self) -> bool {
        self.is_success
    }

    pub(crate) fn status_code(&self) -> u16 {
        self.status_code
    }

    pub(crate) fn errors(&self) -> &[String] {
        &self.errors
    }

    pub(crate) fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }
}

impl<T> Envelope<T> {
    /// Envelope for use cases outside the post lifecycle, such as auth.
    pub(crate) fn with_payload(status_code: u16, message: impl Into<String>, payload: T) -> Self {
        Self::new(message.into(), status_code, Some(payload))
    }
}

impl Envelope<()> {
    /// Envelope for failures raised outside a use case (auth, transport, internal).
    pub(crate) fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self::new(message.into(), status_code, None)
    }
}
