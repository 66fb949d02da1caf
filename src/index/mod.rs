pub mod models;
pub mod parser;
pub mod table;

pub use models::{
    Entry, Locator, MalformedEntryError, MalformedKind, Record, Reference, Result,
};
pub use parser::parse_search_data;
pub use table::SymbolIndex;
