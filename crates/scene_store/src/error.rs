use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Furniture,
    Lights,
    Windows,
    Doors,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Furniture => "furniture",
            Collection::Lights => "lights",
            Collection::Windows => "windows",
            Collection::Doors => "doors",
        };
        f.write_str(name)
    }
}

/// Reason a store operation was not applied. The scene is left untouched
/// whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("{collection} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        collection: Collection,
        index: usize,
        len: usize,
    },
    #[error("furniture item {index} is a fixed element and cannot be removed")]
    FixedItem { index: usize },
    #[error("room dimensions must be positive and finite, got {width}x{height}x{depth}")]
    InvalidDimensions { width: f64, height: f64, depth: f64 },
}
