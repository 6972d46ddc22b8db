pub mod catalog;
pub mod embeddings;
pub mod images;
pub mod sqlite;
pub mod weaviate;
