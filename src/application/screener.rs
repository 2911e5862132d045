//! Session screener
//!
//! The session-context object that owns everything a browser session needs:
//! the resolved model, the metadata lookup, per-session history, and the last
//! analyzed image for follow-up chat. No ambient globals; the UI shell owns
//! one `Screener` and passes session ids through it.

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::normalizer::{self, ParseError};
use crate::config::AppConfig;
use crate::constants::{MAX_TARGET_AGE, MIN_TARGET_AGE};
use crate::domain::history::{HistoryEntry, SessionHistory};
use crate::domain::report::BookReport;
use crate::infrastructure::lookup::BookLookup;
use crate::infrastructure::model::{ImagePayload, ModelError, ModelRequest, ResolvedModel};

#[derive(Debug)]
pub struct AnalyzeRequest {
    pub image: ImagePayload,
    /// Target reader age; falls back to the configured default
    pub target_age: Option<u8>,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AnalyzeOutcome {
    pub report: BookReport,
    pub session_id: String,
    /// False when the title was already in the session history
    pub newly_recorded: bool,
}

#[derive(Debug, Clone)]
pub struct ChatAnswer {
    pub answer: String,
    pub session_id: String,
}

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("target age {age} is outside the supported range")]
    InvalidTargetAge { age: u8 },
    #[error("no cover has been analyzed in this session yet")]
    NoAnalysisYet,
}

impl ScreenError {
    pub fn user_message(&self) -> String {
        match self {
            ScreenError::Model(err) => err.user_message(),
            ScreenError::Parse(err) => err.user_message(),
            ScreenError::InvalidTargetAge { age } => format!(
                "Target age must be between {MIN_TARGET_AGE} and {MAX_TARGET_AGE}, got {age}."
            ),
            ScreenError::NoAnalysisYet => {
                "Analyze a cover first, then ask follow-up questions about it.".to_string()
            }
        }
    }
}

#[derive(Default)]
struct Session {
    target_age: Option<u8>,
    history: SessionHistory,
    last_report: Option<BookReport>,
    last_image: Option<ImagePayload>,
}

/// Screening service shared by the REST server and the CLI
pub struct Screener {
    model: ResolvedModel,
    lookup: BookLookup,
    config: AppConfig,
    sessions: Mutex<HashMap<String, Session>>,
}

impl Screener {
    pub fn new(model: ResolvedModel, lookup: BookLookup, config: AppConfig) -> Self {
        Self {
            model,
            lookup,
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.model()
    }

    /// Analyze one cover image and record the verdict in session history.
    ///
    /// A failed analysis leaves prior session state untouched; the caller may
    /// simply submit a new image.
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeOutcome, ScreenError> {
        let session_id = request.session_id.unwrap_or_else(new_session_id);
        let target_age = self.effective_target_age(&session_id, request.target_age).await?;

        let prompt = compose_analysis_prompt(&self.config.prompt_template, target_age);
        info!(
            session_id = session_id.as_str(),
            model = self.model.model(),
            target_age,
            "Analyzing cover image"
        );

        let reply = self
            .model
            .generate(
                &ModelRequest::text(prompt)
                    .with_image(request.image.clone())
                    .expecting_json(),
            )
            .await?;
        let mut report = normalizer::normalize(&reply)?;

        // Lookup miss falls back to the originally supplied image on the UI side
        match self.lookup.find(&report.title, &report.author).await {
            Some(found) => {
                debug!(title = report.title.as_str(), "Book metadata lookup matched");
                report.cover_url = found.cover_url;
            }
            None => {
                debug!(title = report.title.as_str(), "Book metadata lookup found nothing");
            }
        }

        let newly_recorded = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.entry(session_id.clone()).or_default();
            session.target_age = Some(target_age);
            session.last_report = Some(report.clone());
            session.last_image = Some(request.image);
            let appended = session.history.push(report.clone());
            if !appended {
                warn!(
                    session_id = session_id.as_str(),
                    title = report.title.as_str(),
                    "Title already in session history; not recording again"
                );
            }
            appended
        };

        info!(
            session_id = session_id.as_str(),
            title = report.title.as_str(),
            verdict = report.verdict.as_str(),
            newly_recorded,
            "Analysis complete"
        );

        Ok(AnalyzeOutcome {
            report,
            session_id,
            newly_recorded,
        })
    }

    /// Follow-up question about the last analyzed cover.
    pub async fn ask(
        &self,
        question: &str,
        session_id: &str,
    ) -> Result<ChatAnswer, ScreenError> {
        let (image, report) = {
            let sessions = self.sessions.lock().await;
            let session = sessions.get(session_id).ok_or(ScreenError::NoAnalysisYet)?;
            let image = session.last_image.clone().ok_or(ScreenError::NoAnalysisYet)?;
            let report = session.last_report.clone().ok_or(ScreenError::NoAnalysisYet)?;
            (image, report)
        };

        let prompt = compose_chat_prompt(
            self.config.chat_preamble.as_deref(),
            &report,
            question,
        );
        info!(
            session_id,
            model = self.model.model(),
            "Dispatching follow-up question"
        );

        let reply = self
            .model
            .generate(&ModelRequest::text(prompt).with_image(image))
            .await?;
        if let Some(reason) = reply.block_reason {
            return Err(ScreenError::Parse(ParseError::Blocked { reason }));
        }

        Ok(ChatAnswer {
            answer: reply.text,
            session_id: session_id.to_string(),
        })
    }

    pub async fn history(&self, session_id: &str) -> Vec<HistoryEntry> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(session_id)
            .map(|session| session.history.entries().to_vec())
            .unwrap_or_default()
    }

    /// Plain-text listing of the session history for download
    pub async fn export(&self, session_id: &str) -> String {
        let sessions = self.sessions.lock().await;
        sessions
            .get(session_id)
            .map(|session| session.history.export_listing())
            .unwrap_or_default()
    }

    /// Explicit session reset; drops history, last report and last image.
    pub async fn reset(&self, session_id: &str) {
        let mut sessions = self.sessions.lock().await;
        if sessions.remove(session_id).is_some() {
            info!(session_id, "Session reset");
        }
    }

    async fn effective_target_age(
        &self,
        session_id: &str,
        requested: Option<u8>,
    ) -> Result<u8, ScreenError> {
        let age = match requested {
            Some(age) => age,
            None => {
                let sessions = self.sessions.lock().await;
                sessions
                    .get(session_id)
                    .and_then(|session| session.target_age)
                    .unwrap_or(self.config.target_age)
            }
        };
        if !(MIN_TARGET_AGE..=MAX_TARGET_AGE).contains(&age) {
            return Err(ScreenError::InvalidTargetAge { age });
        }
        Ok(age)
    }
}

fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Fill the configured template and collapse duplicate blank lines.
fn compose_analysis_prompt(template: &str, target_age: u8) -> String {
    let filled = template.replace("{{target_age}}", &target_age.to_string());

    let mut cleaned = Vec::new();
    let mut previous_blank = false;
    for line in filled.lines().map(|line| line.trim_end()) {
        let is_blank = line.trim().is_empty();
        if is_blank {
            if !previous_blank {
                cleaned.push("");
            }
            previous_blank = true;
        } else {
            cleaned.push(line);
            previous_blank = false;
        }
    }
    cleaned.join("\n").trim().to_string()
}

fn compose_chat_prompt(preamble: Option<&str>, report: &BookReport, question: &str) -> String {
    let mut prompt = String::new();
    if let Some(preamble) = preamble {
        prompt.push_str(preamble.trim());
        prompt.push_str("\n\n");
    }
    prompt.push_str(&format!(
        "The pictured book was previously identified as \"{}\" by {} (verdict: {}).\n\n",
        report.title,
        report.author,
        report.verdict.as_str()
    ));
    prompt.push_str("Question: ");
    prompt.push_str(question.trim());
    prompt
}
