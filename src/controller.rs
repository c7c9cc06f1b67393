use log::warn;
use tokio::sync::Mutex;

use crate::client::Transport;
use crate::container::Container;
use crate::error::Error;
use crate::form::{FieldValue, QuizForm};
use crate::model::GeneratedQuiz;
use crate::render;
use crate::response::{self, ServerReply};

pub const DEFAULT_UNAVAILABLE_MESSAGE: &str =
    "Quiz generation is currently unavailable. Please try again later.";

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub generate_url: String,
    pub save_url: String,
    pub csrf_token: String,
    pub unavailable_message: String,
}

impl ControllerConfig {
    pub fn new(
        generate_url: impl Into<String>,
        save_url: impl Into<String>,
        csrf_token: impl Into<String>,
    ) -> Self {
        Self {
            generate_url: generate_url.into(),
            save_url: save_url.into(),
            csrf_token: csrf_token.into(),
            unavailable_message: DEFAULT_UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    /// The service produced a quiz; it is rendered and retained for save.
    Generated { quiz_name: String, questions: usize },
    /// The service rejected the form; messages sit on the named fields.
    Rejected { fields: Vec<String> },
    /// No reply, a non-2xx status, or an uninterpretable body. The
    /// container shows the unavailability heading.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved,
    Rejected { fields: Vec<String> },
    Unavailable,
}

/// Everything one generate/save cycle touches. A single lock over the
/// whole of it is what makes submissions take turns.
struct Cycle {
    form: QuizForm,
    container: Container,
    quiz: Option<GeneratedQuiz>,
}

/// Drives the submit cycle: POST the form, classify the reply, render.
///
/// All collaborators arrive through the constructor, so tests run the
/// full cycle against a fake transport and inspect the container and
/// form afterwards.
pub struct QuizController {
    config: ControllerConfig,
    transport: Box<dyn Transport>,
    cycle: Mutex<Cycle>,
}

impl QuizController {
    pub fn new(config: ControllerConfig, form: QuizForm, transport: Box<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            cycle: Mutex::new(Cycle {
                form,
                container: Container::new(),
                quiz: None,
            }),
        }
    }

    /// True while a submission holds the cycle.
    pub fn busy(&self) -> bool {
        self.cycle.try_lock().is_err()
    }

    pub async fn container(&self) -> Container {
        self.cycle.lock().await.container.clone()
    }

    pub async fn form(&self) -> QuizForm {
        self.cycle.lock().await.form.clone()
    }

    pub async fn quiz(&self) -> Option<GeneratedQuiz> {
        self.cycle.lock().await.quiz.clone()
    }

    /// Change a form field between submissions.
    pub async fn update_field(&self, name: &str, value: FieldValue) -> Result<(), Error> {
        let mut cycle = self.cycle.try_lock().map_err(|_| Error::Busy)?;
        cycle.form.set_value(name, value)
    }

    /// Submit the form to the generation endpoint and render the result.
    ///
    /// A second call while one is in flight fails fast with `Busy`
    /// instead of queueing. Transport and service failures are outcomes,
    /// not errors: the cycle always ends with the form and container in
    /// a presentable state.
    pub async fn generate(&self) -> Result<GenerateOutcome, Error> {
        let mut cycle = self.cycle.try_lock().map_err(|_| Error::Busy)?;

        // Drop every artifact of the previous cycle before the request
        // goes out.
        cycle.form.clear_errors();
        cycle.container.clear();
        cycle.quiz = None;

        let parts = cycle.form.parts();
        let reply = self
            .transport
            .post_form(&self.config.generate_url, &self.config.csrf_token, parts)
            .await;

        let reply = match reply {
            Ok(reply) if reply.is_ok() => reply,
            Ok(reply) => {
                warn!("generation endpoint answered HTTP {}", reply.status);
                render::render_unavailable(&mut cycle.container, &self.config.unavailable_message);
                return Ok(GenerateOutcome::Unavailable);
            }
            Err(e) => {
                warn!("generation request failed: {}", e);
                render::render_unavailable(&mut cycle.container, &self.config.unavailable_message);
                return Ok(GenerateOutcome::Unavailable);
            }
        };

        match response::parse_reply(&reply.body) {
            Ok(ServerReply::Quiz(quiz)) => {
                render::render_quiz(&mut cycle.container, &quiz);
                let outcome = GenerateOutcome::Generated {
                    quiz_name: quiz.quiz_name.clone(),
                    questions: quiz.items.len(),
                };
                cycle.quiz = Some(quiz);
                Ok(outcome)
            }
            Ok(ServerReply::Invalid(errors)) => {
                let fields = cycle.form.apply_errors(&errors)?;
                Ok(GenerateOutcome::Rejected { fields })
            }
            Err(e) => {
                warn!("uninterpretable generation reply: {}", e);
                render::render_unavailable(&mut cycle.container, &self.config.unavailable_message);
                Ok(GenerateOutcome::Unavailable)
            }
        }
    }

    /// Re-submit the rendered quiz to the save endpoint.
    ///
    /// The payload is the base form followed by the container's hidden
    /// fields in document order, so the service receives exactly what
    /// was rendered. The container is left untouched on failure; the
    /// user can retry.
    pub async fn save(&self) -> Result<SaveOutcome, Error> {
        let mut cycle = self.cycle.try_lock().map_err(|_| Error::Busy)?;
        if cycle.quiz.is_none() {
            return Err(Error::NothingToSave);
        }
        cycle.form.clear_errors();

        let mut parts = cycle.form.parts();
        parts.extend(cycle.container.form_parts());
        let reply = self
            .transport
            .post_form(&self.config.save_url, &self.config.csrf_token, parts)
            .await;

        let reply = match reply {
            Ok(reply) if reply.is_ok() => reply,
            Ok(reply) => {
                warn!("save endpoint answered HTTP {}", reply.status);
                return Ok(SaveOutcome::Unavailable);
            }
            Err(e) => {
                warn!("save request failed: {}", e);
                return Ok(SaveOutcome::Unavailable);
            }
        };

        // The save contract fixes the request, not the success body: any
        // 2xx reply that is not a validation failure counts as saved.
        match response::parse_reply(&reply.body) {
            Ok(ServerReply::Invalid(errors)) => {
                let fields = cycle.form.apply_errors(&errors)?;
                Ok(SaveOutcome::Rejected { fields })
            }
            _ => Ok(SaveOutcome::Saved),
        }
    }

    /// Re-render a quiz from an earlier run, as if it had just been
    /// generated.
    pub async fn restore(&self, quiz: GeneratedQuiz) -> Result<(), Error> {
        let mut cycle = self.cycle.try_lock().map_err(|_| Error::Busy)?;
        cycle.form.clear_errors();
        cycle.container.clear();
        render::render_quiz(&mut cycle.container, &quiz);
        cycle.quiz = Some(quiz);
        Ok(())
    }
}
