pub mod context;
pub mod pinecone;
pub mod store;

pub use context::join_matches;
pub use pinecone::PineconeIndex;
pub use store::{ContextMatch, VectorStore};
