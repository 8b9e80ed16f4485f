pub mod category_ops;
pub mod search;
pub mod task_ops;
