use serde_json::Value;
use thiserror::Error;

use crate::model::{FormErrors, GeneratedQuiz};

/// The `error` marker the service puts on a validation-failure body.
pub const VALIDATION_ERROR: &str = "Validation error";

/// A 2xx reply body, classified.
#[derive(Debug)]
pub enum ServerReply {
    Quiz(GeneratedQuiz),
    Invalid(FormErrors),
}

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply body is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reply body is not a JSON object")]
    NotAnObject,

    #[error("reply reports an unrecognized error: {0}")]
    UnknownError(String),

    #[error("validation reply carries no usable form_errors map")]
    MalformedFormErrors,

    #[error("reply carries neither a quiz nor a validation error")]
    UnrecognizedShape,

    #[error("items payload is malformed: {0}")]
    MalformedItems(serde_json::Error),
}

/// Classify a reply body. The `error` key is inspected before the quiz
/// keys: a body carrying both is a validation failure, never a quiz.
pub fn parse_reply(body: &str) -> Result<ServerReply, ReplyError> {
    let value: Value = serde_json::from_str(body)?;
    let obj = value.as_object().ok_or(ReplyError::NotAnObject)?;

    if let Some(err) = obj.get("error") {
        if err.as_str() != Some(VALIDATION_ERROR) {
            let text = err
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            return Err(ReplyError::UnknownError(text));
        }
        let form_errors = obj
            .get("form_errors")
            .cloned()
            .ok_or(ReplyError::MalformedFormErrors)?;
        let form_errors: FormErrors =
            serde_json::from_value(form_errors).map_err(|_| ReplyError::MalformedFormErrors)?;
        return Ok(ServerReply::Invalid(form_errors));
    }

    let items = obj.get("items").ok_or(ReplyError::UnrecognizedShape)?;
    let quiz_name = obj
        .get("quiz_name")
        .and_then(Value::as_str)
        .ok_or(ReplyError::UnrecognizedShape)?;

    let quiz = GeneratedQuiz::from_items_value(quiz_name.to_string(), items.clone())
        .map_err(ReplyError::MalformedItems)?;
    Ok(ServerReply::Quiz(quiz))
}
