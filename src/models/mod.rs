pub mod snippet;
pub mod snippet_store;
pub mod storage;
pub mod tags;

pub use snippet::{Snippet, SnippetDraft};
pub use snippet_store::{SNIPPETS_KEY, SnippetMatch, SnippetStore};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use tags::TagColor;
