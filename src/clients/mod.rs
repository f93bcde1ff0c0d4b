//! Outbound collaborators: the email/SMS backend and object storage.

pub mod backend;
pub mod storage;

pub use backend::{Backend, HttpBackend};
pub use storage::{Presigner, SpacesPresigner};
