use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Error;
use crate::model::GeneratedQuiz;

const SESSION_FILE: &str = "session.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedField {
    pub name: String,
    pub value: String,
}

/// Everything a later run needs to replay the save round trip: the text
/// form fields, the source file (by path and hash), the endpoints, and
/// the verbatim item payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSession {
    pub quiz_name: String,
    pub generated_at: String,
    pub generate_url: String,
    pub save_url: String,
    pub file_field: String,
    pub source_file: PathBuf,
    pub source_hash: String,
    pub fields: Vec<SavedField>,
    pub items_json: String,
}

impl SavedSession {
    pub fn quiz(&self) -> Result<GeneratedQuiz, Error> {
        GeneratedQuiz::from_items_json(self.quiz_name.clone(), &self.items_json).map_err(Error::Json)
    }
}

pub fn default_state_dir() -> Result<PathBuf, Error> {
    let dirs = ProjectDirs::from("", "", "quizforge").ok_or(Error::NoStateDir)?;
    Ok(dirs.data_dir().to_path_buf())
}

pub fn save_session(dir: &Path, session: &SavedSession) -> Result<(), Error> {
    fs::create_dir_all(dir)?;
    let yaml = serde_yaml::to_string(session)?;
    atomic_write(&dir.join(SESSION_FILE), &yaml)
}

pub fn load_session(dir: &Path) -> Result<Option<SavedSession>, Error> {
    let path = dir.join(SESSION_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let session = serde_yaml::from_str(&content)?;
    Ok(Some(session))
}

pub fn clear_session(dir: &Path) -> Result<bool, Error> {
    let path = dir.join(SESSION_FILE);
    if path.exists() {
        fs::remove_file(&path)?;
        return Ok(true);
    }
    Ok(false)
}

fn atomic_write(path: &Path, content: &str) -> Result<(), Error> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn print_status(session: &SavedSession) {
    let questions = session
        .quiz()
        .map(|quiz| quiz.items.len())
        .unwrap_or_default();
    println!("Quiz: {}", session.quiz_name);
    println!("Questions: {}", questions);
    println!("Generated: {}", session.generated_at);
    println!(
        "Source: {} ({})",
        session.source_file.display(),
        session.source_hash
    );
    println!("Save endpoint: {}", session.save_url);
}

pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{}", hex_encode(&hasher.finalize()))
}

pub fn compute_file_hash(path: &Path) -> Result<String, Error> {
    let content = fs::read(path).map_err(|e| Error::SourceFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(hash_bytes(&content))
}

/// Re-read the source document and check it against the stored hash.
/// The quiz was generated from that exact content; a changed file makes
/// the replayed save submission a lie, so it is refused.
pub fn verify_source(session: &SavedSession) -> Result<Vec<u8>, Error> {
    let bytes = fs::read(&session.source_file).map_err(|e| Error::SourceFile {
        path: session.source_file.clone(),
        source: e,
    })?;
    if hash_bytes(&bytes) != session.source_hash {
        return Err(Error::SourceChanged {
            path: session.source_file.clone(),
        });
    }
    Ok(bytes)
}
