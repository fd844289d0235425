//! Normalized result of one Dashboard call.
//!
//! The Dashboard answers with a mix of status codes and bodies: JSON
//! payloads, `{"errors": [...]}` envelopes, empty strings, HTML error
//! pages. [`interpret`] folds every combination into an [`Outcome`].
//! Nothing here returns `Err`; an HTTP failure is data for the caller.

use serde_json::Value;

/// Which flavor of 2xx the server answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessKind {
    /// 200
    Ok,
    /// 201
    Created,
    /// 204
    Deleted,
}

/// Failure class, derived from the status code alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    BadRequest,
    Unauthorized,
    NotFound,
    ServerError,
    /// Any status without a dedicated class, including unlisted 2xx and 3xx.
    Unknown(u16),
}

impl FailureKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            500 => Self::ServerError,
            other => Self::Unknown(other),
        }
    }

    pub fn status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::ServerError => 500,
            Self::Unknown(status) => status,
        }
    }
}

/// Result of one API call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 200/201/204. `payload` is `None` when the body was not JSON.
    Success {
        kind: SuccessKind,
        payload: Option<Value>,
    },
    /// Anything else.
    ///
    /// `detail` holds the body's `errors` field when there was one;
    /// `payload` holds the whole body when it was JSON without `errors`
    /// and the status has a dedicated class.
    Failure {
        kind: FailureKind,
        detail: Option<Value>,
        payload: Option<Value>,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Success { kind, .. } => match kind {
                SuccessKind::Ok => 200,
                SuccessKind::Created => 201,
                SuccessKind::Deleted => 204,
            },
            Self::Failure { kind, .. } => kind.status(),
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Success { payload, .. } | Self::Failure { payload, .. } => payload.as_ref(),
        }
    }

    pub fn detail(&self) -> Option<&Value> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { detail, .. } => detail.as_ref(),
        }
    }

    /// One-line description of this outcome for `label` (e.g. "Switch Port").
    pub fn summary(&self, label: &str) -> String {
        match self {
            Self::Success { kind, payload } => {
                let verb = match kind {
                    SuccessKind::Ok => "Operation Successful",
                    SuccessKind::Created => "Added Successfully",
                    SuccessKind::Deleted => "Deleted Successfully",
                };
                match (kind, payload.is_some()) {
                    (SuccessKind::Ok, true) => {
                        format!("{label} {verb} - Use --action=status option for verification")
                    }
                    (_, true) => format!("{label} {verb} - See returned data for results"),
                    (_, false) => format!("{label} {verb}"),
                }
            }
            Self::Failure {
                kind: FailureKind::ServerError,
                ..
            } => format!("{label}: HTTP 500 - Server Error"),
            Self::Failure {
                kind,
                detail: Some(_),
                ..
            } => {
                let category = match kind {
                    FailureKind::BadRequest => "Bad Request".to_owned(),
                    FailureKind::Unauthorized => "Unauthorized Access".to_owned(),
                    FailureKind::NotFound => "Resource Not Found".to_owned(),
                    other => format!("HTTP Status Code: {}", other.status()),
                };
                format!("{label}: {category} - See returned data for error details")
            }
            Self::Failure {
                kind: FailureKind::BadRequest,
                payload,
                ..
            } => {
                if payload.is_some() {
                    format!("{label}: Bad Request - See returned data for details")
                } else {
                    format!("{label}: Bad Request - No additional error data available")
                }
            }
            Self::Failure {
                kind: FailureKind::Unauthorized,
                payload: Some(_),
                ..
            } => format!("{label}: Unauthorized Access"),
            Self::Failure {
                kind: FailureKind::NotFound,
                payload: Some(_),
                ..
            } => format!("{label}: Resource Not Found"),
            Self::Failure { kind, .. } => {
                format!("{label}: HTTP Status Code: {} - No returned data", kind.status())
            }
        }
    }
}

/// Classify a raw `(status, body)` pair.
///
/// The body counts as "valid" only if it parses as JSON. An `errors` key
/// is looked up only on JSON objects; arrays and scalars never carry one.
pub fn interpret(status: u16, body: &str) -> Outcome {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let errors = parsed
        .as_ref()
        .and_then(Value::as_object)
        .and_then(|obj| obj.get("errors"))
        .cloned();

    match (status, parsed, errors) {
        (200, payload, _) => Outcome::Success {
            kind: SuccessKind::Ok,
            payload,
        },
        (201, payload, _) => Outcome::Success {
            kind: SuccessKind::Created,
            payload,
        },
        (204, payload, _) => Outcome::Success {
            kind: SuccessKind::Deleted,
            payload,
        },
        (500, payload, _) => Outcome::Failure {
            kind: FailureKind::ServerError,
            detail: None,
            payload,
        },
        (_, Some(_), Some(detail)) => Outcome::Failure {
            kind: FailureKind::from_status(status),
            detail: Some(detail),
            payload: None,
        },
        (400 | 401 | 404, Some(body), None) => Outcome::Failure {
            kind: FailureKind::from_status(status),
            detail: None,
            payload: Some(body),
        },
        _ => Outcome::Failure {
            kind: FailureKind::from_status(status),
            detail: None,
            payload: None,
        },
    }
}
