//! Storage abstractions for service layer
//!
//! Reusable file-backed stores that keep a small collection in memory and
//! mirror it to a JSON file after every mutation.

pub mod json_vec_store;
