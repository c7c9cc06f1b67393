use std::fs;

use quizforge::response::{parse_reply, ReplyError, ServerReply};

#[test]
fn test_parse_generated_reply() {
    let body =
        fs::read_to_string("tests/fixtures/generated_quiz.json").expect("Cannot read fixture");
    let quiz = match parse_reply(&body).unwrap() {
        ServerReply::Quiz(quiz) => quiz,
        other => panic!("Expected Quiz, got {:?}", other),
    };

    assert_eq!(quiz.quiz_name, "European Capitals");
    assert_eq!(quiz.items.len(), 2);

    let q1 = &quiz.items[0];
    assert_eq!(q1.question_number, 1);
    assert_eq!(q1.question, "What is the capital of France?");
    assert_eq!(q1.answers, vec!["London", "Paris", "New York", "Toulouse"]);
    assert_eq!(q1.correct_answer, "Paris");

    let q2 = &quiz.items[1];
    assert_eq!(q2.question_number, 2);
    assert_eq!(q2.correct_answer, "Euro");

    // The retained payload is the items array, byte-for-byte equivalent
    let kept: serde_json::Value = serde_json::from_str(quiz.items_json()).unwrap();
    let original: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(kept, original["items"]);
}

#[test]
fn test_parse_validation_reply() {
    let body =
        fs::read_to_string("tests/fixtures/validation_error.json").expect("Cannot read fixture");
    let errors = match parse_reply(&body).unwrap() {
        ServerReply::Invalid(errors) => errors,
        other => panic!("Expected Invalid, got {:?}", other),
    };

    assert_eq!(errors.len(), 2);
    assert_eq!(errors["quiz_name"], vec!["This field is required."]);
    assert_eq!(
        errors["number_of_questions"],
        vec![
            "Ensure this value is less than or equal to 10.",
            "Enter a whole number."
        ]
    );
}

#[test]
fn test_error_key_wins_over_quiz_keys() {
    // A body carrying both shapes is a validation failure
    let body = serde_json::json!({
        "error": "Validation error",
        "form_errors": { "quiz_name": ["Too long."] },
        "quiz_name": "Sneaky",
        "items": []
    })
    .to_string();

    match parse_reply(&body).unwrap() {
        ServerReply::Invalid(errors) => {
            assert_eq!(errors["quiz_name"], vec!["Too long."]);
        }
        other => panic!("Expected Invalid, got {:?}", other),
    }
}

#[test]
fn test_unrecognized_error_marker() {
    let err = parse_reply(r#"{"error": "File processing failed"}"#).unwrap_err();
    match err {
        ReplyError::UnknownError(text) => assert_eq!(text, "File processing failed"),
        other => panic!("Expected UnknownError, got {:?}", other),
    }
}

#[test]
fn test_validation_without_form_errors_is_rejected() {
    let err = parse_reply(r#"{"error": "Validation error"}"#).unwrap_err();
    assert!(matches!(err, ReplyError::MalformedFormErrors));

    let err = parse_reply(r#"{"error": "Validation error", "form_errors": "nope"}"#).unwrap_err();
    assert!(matches!(err, ReplyError::MalformedFormErrors));
}

#[test]
fn test_non_json_bodies_are_rejected() {
    assert!(matches!(
        parse_reply("<!DOCTYPE html><html></html>"),
        Err(ReplyError::Json(_))
    ));
    assert!(matches!(
        parse_reply(r#"["not", "an", "object"]"#),
        Err(ReplyError::NotAnObject)
    ));
}

#[test]
fn test_missing_quiz_keys_are_rejected() {
    assert!(matches!(
        parse_reply(r#"{"items": []}"#),
        Err(ReplyError::UnrecognizedShape)
    ));
    assert!(matches!(
        parse_reply(r#"{"quiz_name": "No items"}"#),
        Err(ReplyError::UnrecognizedShape)
    ));
    assert!(matches!(
        parse_reply(r#"{"quiz_name": 7, "items": []}"#),
        Err(ReplyError::UnrecognizedShape)
    ));
}

#[test]
fn test_malformed_items_are_rejected() {
    let body = serde_json::json!({
        "quiz_name": "Broken",
        "items": [{ "question": "No number or answers" }]
    })
    .to_string();
    assert!(matches!(
        parse_reply(&body),
        Err(ReplyError::MalformedItems(_))
    ));
}

#[test]
fn test_unknown_item_keys_survive_in_retained_payload() {
    let body = serde_json::json!({
        "quiz_name": "Annotated",
        "items": [{
            "question_number": 1,
            "question": "What is 2 + 2?",
            "answers": ["3", "4"],
            "correct_answer": "4",
            "difficulty": "easy"
        }]
    })
    .to_string();

    let quiz = match parse_reply(&body).unwrap() {
        ServerReply::Quiz(quiz) => quiz,
        other => panic!("Expected Quiz, got {:?}", other),
    };

    // The typed view drops the extra key, the retained payload keeps it
    let kept: serde_json::Value = serde_json::from_str(quiz.items_json()).unwrap();
    assert_eq!(kept[0]["difficulty"], "easy");
}
