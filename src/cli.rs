use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quizforge", version, about = "Client for an MCQ-generation web service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a quiz from a source document
    Generate {
        /// Generation endpoint URL
        #[arg(long)]
        url: String,

        /// Save endpoint URL, used by a later `save`
        #[arg(long)]
        save_url: String,

        /// Anti-forgery token, sent as X-CSRF-Token
        #[arg(long, env = "QUIZFORGE_CSRF_TOKEN")]
        csrf_token: String,

        /// Name for the generated quiz
        #[arg(long)]
        quiz_name: String,

        /// Source document to generate questions from
        #[arg(long, value_name = "path")]
        file: PathBuf,

        /// How many questions to request (the service accepts 1-10)
        #[arg(long, default_value_t = 5)]
        questions: u32,

        /// Sampling temperature (the service accepts 0-2)
        #[arg(long, default_value_t = 1)]
        temperature: u32,
    },

    /// Re-submit the last generated quiz to the save endpoint
    Save {
        /// Anti-forgery token, sent as X-CSRF-Token
        #[arg(long, env = "QUIZFORGE_CSRF_TOKEN")]
        csrf_token: String,

        /// Override the save endpoint stored with the session
        #[arg(long)]
        save_url: Option<String>,
    },

    /// Show the stored session without touching the network
    Status,

    /// Drop the stored session
    Clear,
}
