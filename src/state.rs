use std::path::PathBuf;
use std::sync::Arc;

use crate::chat::ChatService;
use crate::core::config::Settings;
use crate::llm::OpenAiProvider;
use crate::rag::PineconeIndex;

/// Shared application state: the chat service wired to the hosted
/// collaborators, plus the static asset root.
pub struct AppState {
    pub chat: ChatService,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn initialize(settings: &Settings) -> Arc<Self> {
        let llm = Arc::new(OpenAiProvider::new(settings));
        let store = Arc::new(PineconeIndex::new(settings));
        let chat = ChatService::new(llm, store, settings.top_k);

        Arc::new(AppState {
            chat,
            static_dir: PathBuf::from("static"),
        })
    }
}
