//! Local response resolution.
//!
//! Maps an utterance to a single response string:
//!
//! 1. lowercase the utterance;
//! 2. first category (then first keyword) contained in it wins, and one of
//!    its responses is picked;
//! 3. otherwise a greeting token yields the greeting reply;
//! 4. otherwise a gratitude token yields the thanks reply;
//! 5. otherwise the out-of-scope disclaimer.
//!
//! Every input resolves to some string; there is no error path.

use std::sync::Arc;

use dost_core::Language;
use tracing::debug;

use crate::knowledge::KnowledgeBase;
use crate::messages::Message;
use crate::picker::{ResponsePicker, ThreadRngPicker};

/// Greeting tokens for both languages, matched as substrings.
static GREETING_TOKENS: &[&str] = &["hello", "hi", "hey", "नमस्ते", "हैलो"];

/// Gratitude tokens for both languages, matched as substrings.
static THANKS_TOKENS: &[&str] = &["thank", "thanks", "धन्यवाद", "शुक्रिया"];

/// Which rule produced a local answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKind {
    /// A knowledge-base category, by id.
    Category(String),
    Greeting,
    Thanks,
    /// Nothing matched.
    Default,
}

/// A local answer plus the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalResolution {
    pub text: String,
    pub kind: MatchKind,
}

/// Resolve `utterance` against `knowledge` without any shared state.
pub fn resolve_locally(
    utterance: &str,
    knowledge: &KnowledgeBase,
    language: Language,
    picker: &dyn ResponsePicker,
) -> LocalResolution {
    let normalized = utterance.to_lowercase();

    if let Some(category) = knowledge.find_match(&normalized) {
        let responses = category.responses();
        let index = picker.pick(responses.len()).min(responses.len() - 1);
        debug!(category = %category.id(), index, "Matched knowledge base category");
        return LocalResolution {
            text: responses[index].clone(),
            kind: MatchKind::Category(category.id().to_string()),
        };
    }

    let (message, kind) = if contains_any(&normalized, GREETING_TOKENS) {
        (Message::Greeting, MatchKind::Greeting)
    } else if contains_any(&normalized, THANKS_TOKENS) {
        (Message::Thanks, MatchKind::Thanks)
    } else {
        (Message::OutOfScope, MatchKind::Default)
    };
    debug!(kind = ?kind, %language, "No category matched");

    LocalResolution {
        text: message.text(language).to_string(),
        kind,
    }
}

fn contains_any(normalized: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| normalized.contains(t))
}

// =============================================================================
// ResponseResolver
// =============================================================================

/// Knowledge base plus response picker, shareable across tasks.
#[derive(Clone)]
pub struct ResponseResolver {
    knowledge: Arc<KnowledgeBase>,
    picker: Arc<dyn ResponsePicker>,
}

impl ResponseResolver {
    /// Resolver over `knowledge` that picks responses at random.
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self::with_picker(knowledge, Arc::new(ThreadRngPicker))
    }

    pub fn with_picker(knowledge: Arc<KnowledgeBase>, picker: Arc<dyn ResponsePicker>) -> Self {
        Self { knowledge, picker }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Resolve to a display string.
    pub fn resolve(&self, utterance: &str, language: Language) -> String {
        self.resolve_detailed(utterance, language).text
    }

    /// Resolve, also reporting which rule matched.
    pub fn resolve_detailed(&self, utterance: &str, language: Language) -> LocalResolution {
        resolve_locally(utterance, &self.knowledge, language, self.picker.as_ref())
    }
}
