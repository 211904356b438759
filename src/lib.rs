//! # gemini-search-chat
//!
//! An interactive command-line chat client for Google's Gemini API with
//! file search (retrieval augmented generation) grounding: create document
//! stores, upload files into them, and converse with the model while it
//! cites the indexed sources.

pub mod chat;
mod client;
mod common;
pub mod config;
pub mod file_search;
pub mod generation;
pub mod stores;
pub mod tools;

pub use chat::{ChatSession, ChatTurn, Citations, Command, Source};
pub use client::{Error as ClientError, Gemini, Result as ClientResult};
pub use config::Config;
pub use file_search::{FileSearchStore, OperationHandle};
pub use generation::{ContentBuilder, GenerationResponse, Role};
pub use stores::{StoreManager, UploadError, UploadSummary};
pub use tools::Tool;
