pub mod collection;
pub mod product;
pub mod record;
