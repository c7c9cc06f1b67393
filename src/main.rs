use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use quizforge::cli::{Cli, Command};
use quizforge::client::HttpTransport;
use quizforge::controller::{ControllerConfig, GenerateOutcome, QuizController, SaveOutcome};
use quizforge::error::Error;
use quizforge::form::QuizForm;
use quizforge::persist::{self, SavedField, SavedSession};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[tokio::main]
async fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    let state_dir = persist::default_state_dir()?;

    match cli.command {
        Command::Generate {
            url,
            save_url,
            csrf_token,
            quiz_name,
            file,
            questions,
            temperature,
        } => {
            generate(
                &state_dir, url, save_url, csrf_token, quiz_name, file, questions, temperature,
            )
            .await
        }
        Command::Save {
            csrf_token,
            save_url,
        } => save(&state_dir, csrf_token, save_url).await,
        Command::Status => status(&state_dir),
        Command::Clear => clear(&state_dir),
    }
}

#[allow(clippy::too_many_arguments)]
async fn generate(
    state_dir: &Path,
    url: String,
    save_url: String,
    csrf_token: String,
    quiz_name: String,
    file: PathBuf,
    questions: u32,
    temperature: u32,
) -> Result<(), Error> {
    let bytes = fs::read(&file).map_err(|e| Error::SourceFile {
        path: file.clone(),
        source: e,
    })?;
    let source_hash = persist::hash_bytes(&bytes);
    let filename = upload_name(&file);

    let mut form = QuizForm::new();
    form.push_text("quiz_name", &quiz_name);
    form.push_file("file", filename, bytes);
    form.push_text("number_of_questions", questions.to_string());
    form.push_text("temperature", temperature.to_string());

    let config = ControllerConfig::new(url.clone(), save_url.clone(), csrf_token);
    let controller = QuizController::new(config, form, Box::new(HttpTransport::new()));

    match controller.generate().await? {
        GenerateOutcome::Generated {
            quiz_name: generated_name,
            questions: count,
        } => {
            println!("{}", controller.container().await);
            println!("Generated \"{}\" with {} questions.", generated_name, count);

            if let Some(quiz) = controller.quiz().await {
                let session = SavedSession {
                    quiz_name: quiz.quiz_name.clone(),
                    generated_at: persist::now_timestamp(),
                    generate_url: url,
                    save_url,
                    file_field: "file".to_string(),
                    source_file: file,
                    source_hash,
                    fields: vec![
                        SavedField {
                            name: "quiz_name".to_string(),
                            value: quiz_name,
                        },
                        SavedField {
                            name: "number_of_questions".to_string(),
                            value: questions.to_string(),
                        },
                        SavedField {
                            name: "temperature".to_string(),
                            value: temperature.to_string(),
                        },
                    ],
                    items_json: quiz.items_json().to_string(),
                };
                persist::save_session(state_dir, &session)?;
                eprintln!("Session stored. Run `quizforge save` to keep the quiz.");
            }
            Ok(())
        }
        GenerateOutcome::Rejected { fields } => {
            print_rejection(&controller.form().await, &fields);
            Ok(())
        }
        GenerateOutcome::Unavailable => {
            println!("{}", controller.container().await);
            Ok(())
        }
    }
}

async fn save(
    state_dir: &Path,
    csrf_token: String,
    save_url_override: Option<String>,
) -> Result<(), Error> {
    let session = persist::load_session(state_dir)?.ok_or(Error::NoSession)?;
    let bytes = persist::verify_source(&session)?;

    let mut form = QuizForm::new();
    for field in &session.fields {
        form.push_text(&field.name, &field.value);
    }
    form.push_file(&session.file_field, upload_name(&session.source_file), bytes);

    let save_url = save_url_override.unwrap_or_else(|| session.save_url.clone());
    let config = ControllerConfig::new(session.generate_url.clone(), save_url, csrf_token);
    let controller = QuizController::new(config, form, Box::new(HttpTransport::new()));
    controller.restore(session.quiz()?).await?;

    match controller.save().await? {
        SaveOutcome::Saved => {
            persist::clear_session(state_dir)?;
            println!("Quiz \"{}\" saved.", session.quiz_name);
            Ok(())
        }
        SaveOutcome::Rejected { fields } => {
            print_rejection(&controller.form().await, &fields);
            Ok(())
        }
        SaveOutcome::Unavailable => {
            println!("The save endpoint is unavailable; the session is kept for retry.");
            Ok(())
        }
    }
}

fn status(state_dir: &Path) -> Result<(), Error> {
    match persist::load_session(state_dir)? {
        Some(session) => persist::print_status(&session),
        None => println!("No stored session."),
    }
    Ok(())
}

fn clear(state_dir: &Path) -> Result<(), Error> {
    if persist::clear_session(state_dir)? {
        eprintln!("Session cleared.");
    } else {
        eprintln!("No stored session.");
    }
    Ok(())
}

fn print_rejection(form: &QuizForm, fields: &[String]) {
    println!("The service rejected the submission:");
    for name in fields {
        if let Some(message) = form.error(name) {
            println!("  {}: {}", name, message);
        }
    }
}

fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string())
}
