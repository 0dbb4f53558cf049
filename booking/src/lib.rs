mod aggregate;
mod storage;
mod store;

pub use aggregate::{aggregate, aggregate_with, CountPolicy, RoomTypeKey, RoomTypeSummary};
pub use storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};
pub use store::{apply, reduce, Action, RawAction, SessionState, Store};
