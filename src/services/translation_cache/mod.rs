pub mod gate;
pub mod store;

pub use gate::{Lookup, TranslationGate};
pub use store::{Dictionary, DictionaryStore, JsonFileStore, MemoryStore};
