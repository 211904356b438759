pub mod citations;
pub mod commands;
pub mod export;
pub mod render;
pub mod session;

pub use citations::{Citations, Source};
pub use commands::{parse, Command};
pub use session::{ChatSession, ChatTurn};
