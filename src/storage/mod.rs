mod kv;
mod settings;

pub use kv::{KvStore, StoreError};
pub use settings::{ReadingStats, Settings};
