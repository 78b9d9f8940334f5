pub mod model;
pub mod printer;
pub mod recorder;
pub mod selector;
pub mod storage;

pub use model::RunRecord;
pub use recorder::record_run;
pub use storage::{HistoryStorage, get_storage};
