//! All Slack-specific functionality

pub mod client;
pub mod listener;
pub mod notifier;

// Re-export main types for convenience
pub use client::SlackClient;
pub use listener::run_listener;
pub use notifier::{Attachment, AttachmentField, ChatPoster, Notifier};
