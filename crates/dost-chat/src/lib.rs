//! Chat assistant for DBT Dost.
//!
//! Resolves free-text questions about Aadhaar, DBT and NSP scholarships to
//! canned answers from a keyword knowledge base, or delegates them to a
//! remote answering service and relays its answer.

pub mod error;
pub mod knowledge;
pub mod messages;
pub mod orchestrator;
pub mod picker;
pub mod remote;
pub mod resolver;
pub mod types;

pub use error::{ChatError, RemoteError};
pub use knowledge::{Category, KnowledgeBase};
pub use messages::Message;
pub use orchestrator::{Answer, AnswerSource, ChatOrchestrator, Reply};
pub use picker::{FixedPicker, ResponsePicker, SeededPicker, ThreadRngPicker};
pub use remote::{ChatTransport, HttpTransport, RemoteResolution, RemoteResolver, TransportResponse};
pub use resolver::{resolve_locally, LocalResolution, MatchKind, ResponseResolver};
pub use types::{ChatReply, ChatRequest};
