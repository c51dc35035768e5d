#![forbid(unsafe_code)]

//! JSON exchange of leaf records with the host.
//!
//! Every field is required. A host that drops `original` (or a coordinate)
//! gets a decode error rather than a zero-filled leaf.

use leafkit_core::geometry::Leaf;

/// Decode a single leaf, e.g. `{"transform":{"x":1,"y":2},"original":{"x":0,"y":0}}`.
pub fn decode_leaf(s: &str) -> Result<Leaf, serde_json::Error> {
    serde_json::from_str(s)
}

/// Decode an array of leaves.
pub fn decode_leaves(s: &str) -> Result<Vec<Leaf>, serde_json::Error> {
    serde_json::from_str(s)
}

/// Encode a leaf.
///
/// Fails only for non-finite coordinates, which JSON cannot represent.
pub fn encode_leaf(leaf: &Leaf) -> Result<String, serde_json::Error> {
    if !is_finite(leaf) {
        return Err(serde::ser::Error::custom(
            "leaf coordinates must be finite to encode as JSON",
        ));
    }
    serde_json::to_string(leaf)
}

fn is_finite(leaf: &Leaf) -> bool {
    [
        leaf.transform.x,
        leaf.transform.y,
        leaf.original.x,
        leaf.original.y,
    ]
    .iter()
    .all(|c| c.is_finite())
}
