use xguard_types::Failure;

use crate::dom::{ElementQuery, NodeId};

/// Find the first element matching `selector` under `scope`.
///
/// Absence and malformed selectors are both logged and yield `None`.
pub fn safe_query_selector<Q>(selector: &str, document: &Q, scope: Option<NodeId>) -> Option<NodeId>
where
    Q: ElementQuery + ?Sized,
{
    let found = document.query_selector(selector, scope).and_then(|found| {
        found.ok_or_else(|| {
            Failure::not_found(format!("Element with selector \"{}\" not found", selector))
        })
    });

    match found {
        Ok(id) => Some(id),
        Err(failure) => {
            tracing::error!(kind = %failure.kind, selector = %selector, "DOM Error: {}", failure.message);
            None
        }
    }
}
