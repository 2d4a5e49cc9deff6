//! Data models for the generic request side and the Nova model catalog.
//!
//! This module groups three submodules:
//! - `nova`: The Amazon Nova model descriptor and its capabilities.
//! - `message`: A provider-neutral message bag and tool definitions.
//! - `options`: Request options recognized by the Nova request builder.
//!
//! The mapping from `message::MessageBag` into Nova's wire shape lives in
//! `crate::contract`.

pub mod message;
pub mod nova;
pub mod options;

pub use message::{ContentPart, Message, MessageBag, Tool, ToolCall, UserContent};
pub use nova::{Capability, Nova};
pub use options::RequestOptions;
