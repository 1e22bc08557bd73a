// データ永続化機能
// レコードの書き込みと結果収集

pub mod collector;
pub mod implementations;

// 公開API
pub use collector::spawn_outcome_collector;
pub use implementations::{write_atomically, JsonRecordWriter};
