//! # UI Map Model
//!
//! Owned tree of UI element descriptors plus the flat list of recorded
//! actions that reference elements by dotted path.

pub mod codec;
pub mod error;
pub mod model;
pub mod path;

pub use codec::{parse, serialize, DocumentCodec, JsonCodec};
pub use error::{CodecError, CodecResult};
pub use model::{Action, ActionList, NodeRef, UiMap, UiMapDocument, UiObject};
pub use path::UiPath;
