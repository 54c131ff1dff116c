//! Service layer for the message board.
//! - `messages`: domain types, id assignment and the repository trait.
//! - `storage`: generic JSON file-backed list store.
//! - `file`: the file-backed `MessageRepository` implementation.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod messages;
pub mod file;
