pub mod embedding_port;
pub mod image_source;
pub mod vector_database;
