pub mod config;
pub mod store;
pub mod task;
pub mod task_list;

pub use config::*;
pub use store::*;
pub use task::*;
pub use task_list::*;
