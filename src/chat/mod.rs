//! Conversation orchestrator: one retrieval-augmented reply per query.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::errors::ApiError;
use crate::history;
use crate::llm::provider::LlmProvider;
use crate::llm::types::ChatMessage;
use crate::rag::context::join_matches;
use crate::rag::store::VectorStore;

/// Per-query system instruction with the topic restriction.
const SYSTEM_INSTRUCTION: &str = r#"You are an expert sales representative for PartSelect, specializing in dishwasher and refrigerator parts. Your role is to:

1. Provide knowledgeable, friendly assistance on products and installations.
2. Demonstrate expertise in dishwasher and refrigerator parts and their functions.
3. Offer clear, concise explanations and step-by-step installation instructions.
4. Maintain a professional tone and prioritize customer needs.

Be concise and respond in bullet points wherever possible. If a query is unrelated to dishwashers, refrigerators, or general appliance concerns, respond:

"I specialize in dishwasher and refrigerator parts. How can I assist you with these appliances today?"

Always aim to provide excellent customer service while effectively representing PartSelect."#;

/// Stand-in query when the request carried no `query` field.
const MISSING_QUERY_PLACEHOLDER: &str = "No query provided";

/// Orchestrates embed -> retrieve -> complete -> append for each query, and
/// owns the conversation history.
///
/// The mutex is held across the whole sequence so concurrent requests cannot
/// interleave their reads and appends.
pub struct ChatService {
    llm: Arc<dyn LlmProvider>,
    store: Arc<dyn VectorStore>,
    memory: Mutex<Vec<ChatMessage>>,
    top_k: usize,
}

impl ChatService {
    pub fn new(llm: Arc<dyn LlmProvider>, store: Arc<dyn VectorStore>, top_k: usize) -> Self {
        Self {
            llm,
            store,
            memory: Mutex::new(history::initial_turns()),
            top_k,
        }
    }

    /// Produce the assistant reply for one query.
    ///
    /// On success the reply is appended to history (exactly one mutation);
    /// on any upstream failure history is left untouched.
    pub async fn answer(&self, query: Option<String>) -> Result<ChatMessage, ApiError> {
        let query = query.unwrap_or_else(|| MISSING_QUERY_PLACEHOLDER.to_string());

        let mut turns = self.memory.lock().await;

        let embedding = self.llm.embed(&query).await?;
        let matches = self.store.query(&embedding, self.top_k).await?;
        let relevant_context = join_matches(&matches);
        tracing::debug!(
            matches = matches.len(),
            "retrieved context for query"
        );

        let mut messages = vec![
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(format!(
                "Given the following context, please provide a helpful response to the user's query. Context: {}\n\nUser query: {}",
                relevant_context, query
            )),
        ];
        messages.extend(history::recent_window(&turns, history::HISTORY_WINDOW));

        let reply = self.llm.chat(&messages).await?;

        turns.push(ChatMessage::assistant(reply.clone()));
        history::enforce_cap(&mut turns, history::MAX_TURNS);

        Ok(ChatMessage::assistant(reply))
    }

    /// Reset history to the single persona turn. Idempotent.
    pub async fn clear_memory(&self) {
        let mut turns = self.memory.lock().await;
        *turns = history::initial_turns();
        tracing::info!("conversation memory cleared");
    }

    #[cfg(test)]
    pub(crate) async fn turns(&self) -> Vec<ChatMessage> {
        self.memory.lock().await.clone()
    }
}
