pub mod model;

pub use model::{FileSearchConfig, Tool};
