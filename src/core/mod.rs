pub mod annotation;
pub mod converter;
pub mod engine;
pub mod matcher;
pub mod resolver;
pub mod root_index;
pub mod types;
