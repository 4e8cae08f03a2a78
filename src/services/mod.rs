pub mod ai;
pub mod ai_types;
pub mod encoding;
pub mod genius;
pub mod lyrics;
pub mod persist;
pub mod pipeline;
pub mod records;
pub mod script;
pub mod tokenizer;
pub mod translation_cache;
pub mod youtube;
