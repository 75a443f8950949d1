//! Canonical XPath addressing for synchronized browser DOMs
//!
//! Given a node in a DOM tree, [`path::xpath`] computes a location path
//! string that resolves back to exactly that node when evaluated against
//! the same document. The [`sync`] module wraps the computation into the
//! serializable element identifiers a browser-sync tool exchanges between
//! instances when replaying UI events.
//!
//! ```text
//! host snapshot (JSON) -> DomTreeBuilder -> DomArena -> xpath() -> ElementData
//!                                                                      |
//!                                              host XPathEvaluator <---+
//! ```
//!
//! The tree is an immutable snapshot during path computation; paths are
//! only valid against the unmodified document they were computed from.

pub mod arena;
pub mod builder;
pub mod error;
pub mod path;
pub mod sync;
pub mod types;

pub use arena::DomArena;
pub use builder::DomTreeBuilder;
pub use error::{DomError, Result};
pub use path::{sibling_index, step_for, xpath, PathStep, SiblingRank};
pub use sync::{ElementData, ElementMapper, MapperConfig, XPathEvaluator};
pub use types::{DomNode, NodeId, NodeType};
