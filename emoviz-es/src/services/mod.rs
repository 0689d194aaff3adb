//! Service layer: remote model access, classification orchestration,
//! reply generation and conversation storage

pub mod conversation_store;
pub mod llm_client;
pub mod orchestrator;
pub mod remote_classifier;
pub mod responder;

pub use conversation_store::ConversationStore;
pub use llm_client::{ChatBackend, ChatMessage, ChatRequest, ChatRole, LlmError, OpenAiClient};
pub use orchestrator::{ClassificationOrchestrator, ClassificationSource, Classified};
pub use responder::EmpathyResponder;
