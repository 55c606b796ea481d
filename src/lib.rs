// tasklist - In-memory task list engine with filtered, date-sorted views

pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod render;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, OutputFormat};
pub use error::StoreError;
pub use filter::Filter;
pub use models::{Task, TaskId, TaskStatus, parse_date};
pub use render::{JsonlRenderer, Renderer, TextRenderer};
pub use session::{Flow, Session};
pub use store::{TaskStore, View, ViewEntry};
