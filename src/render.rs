use crate::container::{Container, Node};
use crate::model::GeneratedQuiz;

pub const SAVE_LABEL: &str = "Save Quiz";

/// Render a generated quiz into the container.
///
/// Items are walked in payload order and the declared `question_number`
/// names every derived field, so the same quiz always produces the same
/// node sequence. Answer ordinals start at 1.
pub fn render_quiz(container: &mut Container, quiz: &GeneratedQuiz) {
    for item in &quiz.items {
        let number = item.question_number;
        container.push(Node::Heading(format!(
            "Question {}: {}",
            number, item.question
        )));
        container.push(Node::HiddenField {
            name: format!("question_{}", number),
            value: item.question.clone(),
        });
        for (idx, answer) in item.answers.iter().enumerate() {
            container.push(Node::AnswerText(answer.clone()));
            container.push(Node::HiddenField {
                name: format!("question_{}_answer_{}", number, idx + 1),
                value: answer.clone(),
            });
        }
        container.push(Node::HiddenField {
            name: format!("correct_answer_{}", number),
            value: item.correct_answer.clone(),
        });
    }

    container.push(Node::SaveButton {
        label: SAVE_LABEL.to_string(),
    });
    container.push(Node::HiddenField {
        name: "whole_quiz".to_string(),
        value: quiz.items_json().to_string(),
    });
    container.push(Node::HiddenField {
        name: "quiz_name_user".to_string(),
        value: quiz.quiz_name.clone(),
    });
}

/// Add the single unavailability heading. The caller has already cleared
/// the container, so this heading is the only visible node afterwards.
pub fn render_unavailable(container: &mut Container, message: &str) {
    container.push(Node::Heading(message.to_string()));
}
