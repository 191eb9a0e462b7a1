use crate::application::engine::Outcome;
use crate::error::{LedgerError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// The boundary shape of a rejected call.
#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorPayload {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorBody {
    pub code: &'static str,
    pub operation: String,
    pub message: String,
}

impl ErrorPayload {
    pub fn new(operation: &str, error: &LedgerError) -> Self {
        Self {
            error: ErrorBody {
                code: error.code(),
                operation: operation.to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// A rendered response plus the error signal that decides success.
///
/// Callers must trust `error` over `payload`: a failed call still carries a
/// payload describing the failure.
#[derive(Debug)]
pub struct Reply {
    pub payload: Value,
    pub error: Option<LedgerError>,
}

impl Reply {
    /// Renders the result of `operation`.
    ///
    /// A failed read renders only the error payload, never entity fields.
    pub fn render(operation: &str, result: Result<Outcome>) -> Self {
        match result.and_then(render_outcome) {
            Ok(rendered) => Self {
                payload: object([
                    ("operation", Value::from(operation)),
                    ("result", rendered),
                ]),
                error: None,
            },
            Err(error) => Self {
                payload: error_payload(operation, &error),
                error: Some(error),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

fn render_outcome(outcome: Outcome) -> Result<Value> {
    match outcome {
        Outcome::Ack => Ok(Value::from("ack")),
        Outcome::Invoice(view) => to_value(&view),
        Outcome::PaymentRequest(view) => to_value(&view),
    }
}

fn error_payload(operation: &str, error: &LedgerError) -> Value {
    to_value(&ErrorPayload::new(operation, error)).unwrap_or_else(|_| {
        object([(
            "error",
            object([("message", Value::from(error.to_string()))]),
        )])
    })
}

fn object<const N: usize>(fields: [(&str, Value); N]) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect::<Map<String, Value>>(),
    )
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| {
        LedgerError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Serialization error: {}", e),
        )))
    })
}
