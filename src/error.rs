use thiserror::Error;

/// Conditions raised by footprint extraction and catalog indexing.
///
/// Library functions return `anyhow::Result`; these variants travel inside the
/// `anyhow::Error` and can be recovered with `downcast_ref::<FootprintError>()`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FootprintError {
    #[error("bounds accessor returned {0} values, expected 4")]
    BoundsArity(usize),

    #[error("bound at position {position} is not numeric: {value}")]
    NonNumericBound { position: usize, value: String },

    #[error("catalog has no items")]
    EmptyCatalog,

    #[error("item '{item}' has no '{asset}' asset")]
    MissingAsset { item: String, asset: String },

    #[error("asset '{asset}' of item '{item}' has no integer '{field}' field")]
    MissingEpsg { item: String, asset: String, field: String },

    #[error("item '{item}' is in epsg:{found}, but the catalog is in epsg:{expected}")]
    CrsMismatch { item: String, expected: u32, found: u32 },

    #[error("duplicate item id '{0}'")]
    DuplicateId(String),

    #[error("invalid geometry for item '{item}': {reason}")]
    InvalidGeometry { item: String, reason: String },

    #[error("item '{0}' not found in catalog")]
    UnknownItem(String),

    #[error("item id '{0}' is shared by several catalog items and cannot be looked up by id")]
    AmbiguousId(String),
}
