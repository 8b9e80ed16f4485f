//! A categorised task list backed by a single JSON file.
//!
//! The core is the [`model`] (task records, per-category task lists and the
//! store that owns them), the pure [`ops`] over it, and [`io`] for the task
//! file. [`session::Session`] ties them together for callers such as the `tn`
//! command-line shell in [`cli`].

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod session;
pub mod util;
