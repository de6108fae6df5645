//! Conversation flow: Welcome → SourceLangSelect → TargetLangSelect →
//! WordEntry → Success/Error. Success and Error are re-entrant
//! checkpoints: both accept retry (keep the language pair) or restart.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::languages;
use crate::present;
use crate::provider::{ProviderError, TranslationProvider};
use crate::ranking::{self, RankError, RankedResult};
use crate::session::Session;

/// All conversation states. The machine has no terminal state; every
/// state reachable from Welcome can return to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatState {
    Welcome,
    SourceLangSelect,
    TargetLangSelect,
    WordEntry,
    Success,
    Error,
}

impl std::fmt::Display for ChatState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatState::Welcome => write!(f, "Welcome"),
            ChatState::SourceLangSelect => write!(f, "SourceLangSelect"),
            ChatState::TargetLangSelect => write!(f, "TargetLangSelect"),
            ChatState::WordEntry => write!(f, "WordEntry"),
            ChatState::Success => write!(f, "Success"),
            ChatState::Error => write!(f, "Error"),
        }
    }
}

impl ChatState {
    /// Returns whether transitioning from `self` to `next` is valid.
    pub fn can_transition_to(self, next: ChatState) -> bool {
        matches!(
            (self, next),
            (ChatState::Welcome, ChatState::SourceLangSelect)
                | (ChatState::SourceLangSelect, ChatState::TargetLangSelect)
                | (ChatState::TargetLangSelect, ChatState::WordEntry)
                | (ChatState::WordEntry, ChatState::Success)
                | (ChatState::WordEntry, ChatState::Error)
                | (ChatState::Success, ChatState::WordEntry) // try another word
                | (ChatState::Error, ChatState::WordEntry) // try another word
                // Restart is allowed from anywhere
                | (_, ChatState::Welcome)
        )
    }
}

/// Input events, as delivered by the transport. `Select` carries a
/// language code; control tags arrive as `Begin`/`Retry`/`Restart`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Begin,
    Select(String),
    Text(String),
    Retry,
    Restart,
}

/// One selectable option the transport may render however it likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub tag: String,
}

/// Prompt text plus optional selectable options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub choices: Vec<Choice>,
}

impl Reply {
    fn new(text: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            text: text.into(),
            choices,
        }
    }
}

fn begin_choices() -> Vec<Choice> {
    vec![Choice {
        label: "🌍 Translate".to_string(),
        tag: "begin".to_string(),
    }]
}

fn language_choices(exclude: Option<&str>) -> Vec<Choice> {
    languages::choices(exclude)
        .map(|lang| Choice {
            label: lang.name.to_string(),
            tag: lang.code.to_string(),
        })
        .collect()
}

fn recovery_choices() -> Vec<Choice> {
    vec![
        Choice {
            label: "🔁 Restart".to_string(),
            tag: "restart".to_string(),
        },
        Choice {
            label: "✏️ Try another word".to_string(),
            tag: "retry".to_string(),
        },
    ]
}

/// Failure of the fetch+rank pipeline. Collapsed into the Error state at
/// the state machine, kept distinct for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Provider(ProviderError),
    Rank(RankError),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Provider(e) => write!(f, "{e}"),
            PipelineError::Rank(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PipelineError {}

fn transition(session: &mut Session, next: ChatState) {
    let from = session.state;
    if !from.can_transition_to(next) {
        warn!(from = %from, to = %next, "invalid_transition_ignored");
        return;
    }
    info!(from = %from, to = %next, "state_transition");
    session.state = next;
}

/// Re-prompt for the current state without changing anything.
fn reprompt(session: &Session) -> Reply {
    match session.state {
        ChatState::Welcome => Reply::new(present::WELCOME, begin_choices()),
        ChatState::SourceLangSelect => Reply::new(present::PROMPT_SOURCE, language_choices(None)),
        ChatState::TargetLangSelect => Reply::new(
            present::PROMPT_TARGET,
            language_choices(session.source_lang.as_deref()),
        ),
        ChatState::WordEntry => Reply::new(present::PROMPT_WORD, Vec::new()),
        ChatState::Success | ChatState::Error => {
            Reply::new(present::WHAT_NEXT, recovery_choices())
        }
    }
}

/// Process one event against the session. The caller must hold the
/// session's mutex for the whole call so events stay strictly sequential.
/// Events that don't match the current state re-prompt and change nothing.
pub async fn handle_event(
    session: &mut Session,
    event: Event,
    provider: &dyn TranslationProvider,
) -> Reply {
    match (session.state, event) {
        (_, Event::Restart) => {
            info!(from = %session.state, "session_restart");
            // Clearing pending_request also voids any in-flight fetch.
            session.reset();
            Reply::new(present::WELCOME, begin_choices())
        }
        (ChatState::Welcome, Event::Begin) => {
            transition(session, ChatState::SourceLangSelect);
            Reply::new(present::PROMPT_SOURCE, language_choices(None))
        }
        (ChatState::SourceLangSelect, Event::Select(code)) => {
            if languages::lookup(&code).is_none() {
                warn!(code = %code, "invalid_selection");
                return Reply::new(present::UNKNOWN_LANGUAGE, language_choices(None));
            }
            session.source_lang = Some(code.clone());
            transition(session, ChatState::TargetLangSelect);
            Reply::new(present::PROMPT_TARGET, language_choices(Some(&code)))
        }
        (ChatState::TargetLangSelect, Event::Select(code)) => {
            let source = session.source_lang.as_deref().map(str::to_string);
            if languages::lookup(&code).is_none() {
                warn!(code = %code, "invalid_selection");
                return Reply::new(
                    present::UNKNOWN_LANGUAGE,
                    language_choices(source.as_deref()),
                );
            }
            if source.as_deref() == Some(code.as_str()) {
                warn!(code = %code, "invalid_selection_target_equals_source");
                return Reply::new(present::SAME_LANGUAGE, language_choices(source.as_deref()));
            }
            session.target_lang = Some(code);
            transition(session, ChatState::WordEntry);
            Reply::new(present::PROMPT_WORD, Vec::new())
        }
        (ChatState::WordEntry, Event::Text(word)) => {
            let word = word.trim().to_string();
            if word.is_empty() {
                return Reply::new(present::PROMPT_WORD, Vec::new());
            }
            let (Some(source), Some(target)) =
                (session.source_lang.clone(), session.target_lang.clone())
            else {
                // Language pair missing in WordEntry means the session record
                // is corrupt; start over rather than guessing.
                warn!("word_entry_without_language_pair");
                session.reset();
                return Reply::new(present::WELCOME, begin_choices());
            };

            session.word = Some(word.clone());
            let request_id = Uuid::new_v4();
            session.pending_request = Some(request_id);
            debug!(request = %request_id, word = %word, "pipeline_started");

            let outcome = run_pipeline(provider, &source, &target, &word).await;
            apply_pipeline_outcome(session, request_id, outcome)
                .unwrap_or_else(|| reprompt(session))
        }
        (ChatState::Success | ChatState::Error, Event::Retry) => {
            transition(session, ChatState::WordEntry);
            Reply::new(present::PROMPT_ANOTHER_WORD, Vec::new())
        }
        (state, event) => {
            debug!(state = %state, event = ?event, "unmatched_event_ignored");
            reprompt(session)
        }
    }
}

/// One fetch, one rank. No retries; errors propagate once to the caller.
async fn run_pipeline(
    provider: &dyn TranslationProvider,
    source: &str,
    target: &str,
    phrase: &str,
) -> Result<RankedResult, PipelineError> {
    let raw = provider
        .fetch(source, target, phrase)
        .await
        .map_err(PipelineError::Provider)?;
    ranking::rank(raw).map_err(PipelineError::Rank)
}

/// Apply a finished pipeline to the session, unless the session has moved
/// on since the request was issued (rapid restart): stale results are
/// discarded instead of corrupting the newer state.
pub(crate) fn apply_pipeline_outcome(
    session: &mut Session,
    request_id: Uuid,
    outcome: Result<RankedResult, PipelineError>,
) -> Option<Reply> {
    if session.pending_request != Some(request_id) {
        info!(request = %request_id, "stale_pipeline_result_discarded");
        return None;
    }
    session.pending_request = None;

    Some(match outcome {
        Ok(result) => {
            let source = session.source_lang.as_deref().unwrap_or("?");
            let target = session.target_lang.as_deref().unwrap_or("?");
            let body = present::render_result(&result, source, target);
            transition(session, ChatState::Success);
            Reply::new(
                format!("{body}\n\n{}", present::WHAT_NEXT),
                recovery_choices(),
            )
        }
        Err(err) => {
            warn!(error = %err, "translation_pipeline_failed");
            transition(session, ChatState::Error);
            Reply::new(
                format!("{}\n\n{}", present::TRANSLATION_FAILED, present::WHAT_NEXT),
                recovery_choices(),
            )
        }
    })
}
