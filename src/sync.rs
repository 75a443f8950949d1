//! Browser-sync element identification
//!
//! Translates between DOM elements and the serializable identifiers a
//! browser-sync tool ships between synchronized instances when replaying
//! UI events. Outbound, an element becomes an [`ElementData`] carrying its
//! canonical XPath; inbound, the identifier is handed to a host-supplied
//! [`XPathEvaluator`] to recover a concrete node.

use crate::arena::DomArena;
use crate::error::Result;
use crate::path;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Wire identifier for an element, as exchanged between synchronized
/// browsers.
///
/// `tag_name` carries the canonical XPath; `index` is always 0 here, a
/// legacy field of the tag-name+index addressing this scheme replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementData {
    pub tag_name: String,
    pub index: u32,
}

/// Host capability for evaluating an XPath expression against a document,
/// returning the first matching node in document order.
pub trait XPathEvaluator {
    fn first_ordered_node(&self, expr: &str) -> Option<NodeId>;
}

/// Mapper configuration.
#[derive(Debug, Clone)]
pub struct MapperConfig {
    /// Use the `//*[@id="..."]` shortcut for elements with an id attribute.
    pub optimized: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self { optimized: true }
    }
}

/// Element <-> identifier translation for the sync layer.
#[derive(Debug, Default)]
pub struct ElementMapper {
    config: MapperConfig,
}

impl ElementMapper {
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    pub fn with_config(config: MapperConfig) -> Self {
        Self { config }
    }

    /// Serialize an element into its wire identifier.
    ///
    /// `Ok(None)` means the node could not be addressed (stale or corrupted
    /// tree view); the caller must fall back to another identification
    /// strategy.
    pub fn element_data(&self, arena: &DomArena, node_id: NodeId) -> Result<Option<ElementData>> {
        match path::xpath(arena, node_id, self.config.optimized)? {
            Some(expr) => {
                debug!(node_id, xpath = %expr, "serialized element");
                Ok(Some(ElementData {
                    tag_name: expr,
                    index: 0,
                }))
            }
            None => {
                warn!(node_id, "no path for node, element identification failed");
                Ok(None)
            }
        }
    }

    /// Resolve a wire identifier back to a node via the host evaluator.
    pub fn single_element<E: XPathEvaluator>(
        &self,
        evaluator: &E,
        data: &ElementData,
    ) -> Option<NodeId> {
        let found = evaluator.first_ordered_node(&data.tag_name);
        if found.is_none() {
            debug!(xpath = %data.tag_name, "no node matched identifier");
        }
        found
    }
}
