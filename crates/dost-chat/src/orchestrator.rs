//! Chat orchestrator: picks local or remote resolution and keeps answers in
//! submission order.
//!
//! Every submission takes the next turn number. A remote call that is still
//! in flight when a newer turn is submitted is dropped (which aborts the
//! request) and reports [`Reply::Superseded`] instead of a stale answer.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dost_core::config::DostConfig;
use dost_core::{ChatMode, Language};
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ChatError, RemoteError};
use crate::knowledge::KnowledgeBase;
use crate::messages::Message;
use crate::picker::{ResponsePicker, SeededPicker, ThreadRngPicker};
use crate::remote::RemoteResolver;
use crate::resolver::{MatchKind, ResponseResolver};

/// Where an answer came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSource {
    Local(MatchKind),
    /// Remote service; `error` is set when the text is a substitute.
    Remote { error: Option<RemoteError> },
}

/// An answer ready for display.
#[derive(Debug, Clone)]
pub struct Answer {
    pub id: Uuid,
    pub turn: u64,
    pub text: String,
    pub source: AnswerSource,
    pub answered_at: DateTime<Utc>,
}

impl Answer {
    fn new(turn: u64, text: String, source: AnswerSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            turn,
            text,
            source,
            answered_at: Utc::now(),
        }
    }
}

/// Outcome of one submission.
#[derive(Debug, Clone)]
pub enum Reply {
    Answered(Answer),
    /// A newer turn was submitted before this one finished.
    Superseded { turn: u64 },
}

impl Reply {
    pub fn answer(&self) -> Option<&Answer> {
        match self {
            Reply::Answered(a) => Some(a),
            Reply::Superseded { .. } => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Reply::Answered(a) => Some(a.text),
            Reply::Superseded { .. } => None,
        }
    }
}

/// Central coordinator for a chat session.
pub struct ChatOrchestrator {
    local: ResponseResolver,
    remote: RemoteResolver,
    mode: ChatMode,
    default_language: Language,
    next_turn: AtomicU64,
    latest_turn: watch::Sender<u64>,
}

impl ChatOrchestrator {
    pub fn new(local: ResponseResolver, remote: RemoteResolver, mode: ChatMode) -> Self {
        let (latest_turn, _) = watch::channel(0);
        Self {
            local,
            remote,
            mode,
            default_language: Language::default(),
            next_turn: AtomicU64::new(0),
            latest_turn,
        }
    }

    /// Build from configuration: knowledge base (built-in or file), picker
    /// (seeded or random), remote endpoint, mode and default language.
    pub fn from_config(config: &DostConfig) -> Result<Self, ChatError> {
        let knowledge = match config.chat.knowledge_base_path.as_deref() {
            Some(path) => KnowledgeBase::load(Path::new(path))?,
            None => KnowledgeBase::builtin(),
        };
        let picker: Arc<dyn ResponsePicker> = match config.chat.seed {
            Some(seed) => Arc::new(SeededPicker::new(seed)),
            None => Arc::new(ThreadRngPicker),
        };
        info!(
            categories = knowledge.len(),
            mode = ?config.chat.mode,
            endpoint = %config.remote.endpoint,
            "Chat orchestrator configured"
        );

        let local = ResponseResolver::with_picker(Arc::new(knowledge), picker);
        let remote = RemoteResolver::http(config.remote.endpoint.clone());
        Ok(Self::new(local, remote, config.chat.mode).with_default_language(config.chat.language))
    }

    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    pub fn with_mode(mut self, mode: ChatMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    /// Resolver used for local turns.
    pub fn local_resolver(&self) -> &ResponseResolver {
        &self.local
    }

    /// Opening line for a new conversation.
    pub fn welcome(&self, language: Option<Language>) -> &'static str {
        Message::Welcome.text(language.unwrap_or(self.default_language))
    }

    /// Answer one utterance in the configured mode.
    ///
    /// Local turns always answer. Remote turns resolve to
    /// [`Reply::Superseded`] if a newer turn is submitted before they
    /// complete.
    pub async fn submit(&self, utterance: &str, language: Option<Language>) -> Reply {
        let language = language.unwrap_or(self.default_language);
        let turn = self.begin_turn();

        match self.mode {
            ChatMode::Local => {
                let res = self.local.resolve_detailed(utterance, language);
                Reply::Answered(Answer::new(turn, res.text, AnswerSource::Local(res.kind)))
            }
            ChatMode::Remote => {
                let mut latest = self.latest_turn.subscribe();
                let res = tokio::select! {
                    res = self.remote.resolve_detailed(utterance, language) => res,
                    _ = newer_turn(&mut latest, turn) => {
                        debug!(turn, "Remote turn superseded while in flight");
                        return Reply::Superseded { turn };
                    }
                };

                // A newer turn may have started just as this one completed.
                if self.current_turn() > turn {
                    debug!(turn, "Discarding late answer");
                    return Reply::Superseded { turn };
                }

                Reply::Answered(Answer::new(
                    turn,
                    res.text,
                    AnswerSource::Remote { error: res.error },
                ))
            }
        }
    }

    /// Most recently issued turn number (0 before the first submission).
    pub fn current_turn(&self) -> u64 {
        *self.latest_turn.borrow()
    }

    fn begin_turn(&self) -> u64 {
        let turn = self.next_turn.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest_turn.send_modify(|latest| *latest = (*latest).max(turn));
        turn
    }
}

/// Completes once a turn newer than `turn` has been issued.
async fn newer_turn(latest: &mut watch::Receiver<u64>, turn: u64) {
    loop {
        if *latest.borrow_and_update() > turn {
            return;
        }
        if latest.changed().await.is_err() {
            // Sender gone: no newer turn can ever arrive.
            std::future::pending::<()>().await;
        }
    }
}
