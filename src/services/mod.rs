pub mod analysis;
pub mod file_cache;
pub mod history;
pub mod ledger;
pub mod resolver;
pub mod strategy;

pub use file_cache::FileCache;
pub use history::{CandleSource, HistoryService};
pub use ledger::Ledger;
pub use resolver::PriceResolver;
