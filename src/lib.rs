pub mod error;
pub mod fitness;
pub mod generate;
pub mod render;
pub mod search;
pub mod types;

pub use error::{Error, Result};
pub use search::{Method, SearchConfig, solve, solve_named};
pub use types::{Cut, FreeRect, Item, Layout, Panel, Params, Placement};
