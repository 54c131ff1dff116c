//! Message board domain: the `Message` record, id assignment and the
//! repository seam handlers talk to.

pub mod domain;
pub mod repository;

pub use domain::{next_id, Message, MessageInput};
pub use repository::MessageRepository;
