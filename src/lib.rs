//! Retrieval-augmented support-chat backend for an appliance-parts store,
//! plus the offline crawler that populates its vector index.
//!
//! - [`chat`]: the conversation orchestrator (embed, retrieve, complete,
//!   append) and memory reset
//! - [`history`]: persona turn, replay window, turn cap
//! - [`llm`]: OpenAI-compatible chat/embeddings client
//! - [`rag`]: vector index client (Pinecone data plane) and context joining
//! - [`crawler`]: category-page link crawler and product-page scraper
//! - [`server`]: axum routes for `/get-message`, `/clear-memory`, static assets
//! - [`core`]: configuration, errors, logging

pub mod chat;
pub mod core;
pub mod crawler;
pub mod history;
pub mod llm;
pub mod rag;
pub mod server;
pub mod state;
