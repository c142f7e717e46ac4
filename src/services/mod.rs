pub mod aggregator;
pub mod builder;
pub mod candidates;
pub mod catalog;
pub mod history;
pub mod join;
pub mod movie_search;
pub mod normalizer;
pub mod ranker;
pub mod recommendations;

pub use catalog::{MovieCatalog, TmdbCatalog};
pub use history::{HistoryStore, InMemoryHistoryStore, PostgresHistoryStore};
pub use recommendations::{RecommendationPipeline, Recommendations};
