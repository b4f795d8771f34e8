//! Attribute bag applied in bulk to a surface
//!
//! Keys are attribute names (`"title"`, `"xlabel"`, `"ylim"`, ...), values are
//! free-form JSON. The bag is forwarded verbatim by the renderers; which keys
//! exist and which value shapes they accept is each backend's own contract.
//! Insertion order is preserved so bulk application is deterministic.

use indexmap::IndexMap;
use serde_json::Value;

pub type AttrBag = IndexMap<String, Value>;

/// Build an [`AttrBag`] from `"key": value` pairs.
///
/// ```
/// use ax_core::attrs;
///
/// let bag = attrs! {
///     "title": "Example Plot",
///     "yscale": "log",
///     "xlim": [0.0, 10.0],
/// };
/// assert_eq!(bag.len(), 3);
/// ```
#[macro_export]
macro_rules! attrs {
    () => { $crate::AttrBag::new() };
    ($($key:literal : $value:tt),+ $(,)?) => {{
        let mut bag = $crate::AttrBag::new();
        $( bag.insert($key.to_string(), $crate::serde_json::json!($value)); )+
        bag
    }};
}
