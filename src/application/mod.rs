pub mod collection;
pub mod demo;
pub mod ingest;
pub mod readiness;
pub mod search;
