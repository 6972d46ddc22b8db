pub mod client;
pub mod graphql;
