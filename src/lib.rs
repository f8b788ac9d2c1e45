pub mod config;
pub mod db;
pub mod model;
pub mod ops;
pub mod output;
pub mod search;
pub mod store;
pub mod validate;

pub use model::{Comment, Priority, Project, Task, TaskStatus};
pub use search::{
    autocomplete, search, search_filtered, MatchType, ResultFilter, SearchOptions,
    SearchResponse, SearchResult, SearchType, Suggestion,
};
pub use store::{InMemoryStore, Repository, SqliteStore};
