//! In-memory DOM used by guarded element lookup.
//!
//! [`Document`] is an arena of nodes addressed by [`NodeId`]; selectors are
//! parsed by [`selector`] and matched against it. Hosts with their own DOM
//! implement [`ElementQuery`] instead.

pub mod document;
pub mod selector;

pub use document::{Document, ElementData, Node, NodeData, NodeId};
pub use selector::SelectorList;

use xguard_types::Failure;

/// DOM query capability.
pub trait ElementQuery {
    /// First element matching `selectors` among the descendants of `scope`
    /// (the document root when `None`), in document order.
    ///
    /// A malformed selector fails with a syntax failure.
    fn query_selector(&self, selectors: &str, scope: Option<NodeId>)
        -> Result<Option<NodeId>, Failure>;
}

impl ElementQuery for Document {
    fn query_selector(
        &self,
        selectors: &str,
        scope: Option<NodeId>,
    ) -> Result<Option<NodeId>, Failure> {
        let list = SelectorList::parse(selectors)?;
        let scope = scope.unwrap_or(Document::ROOT);
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|&id| list.matches(self, id)))
    }
}
