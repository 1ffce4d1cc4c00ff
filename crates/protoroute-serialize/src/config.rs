/// Controls how strictly a catalog checks its route mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogConfig {
    /// When true, a mapping that is not a JSON object of route descriptors
    /// fails construction with `SerializeError::MalformedMapping`. When false,
    /// the catalog keeps the raw text and an empty route table.
    pub strict_mapping: bool,
    /// When true, every type named by a route descriptor must be declared in
    /// the schema text.
    pub require_declared_types: bool,
}

impl CatalogConfig {
    /// Strict mapping parse plus declared-type checks.
    pub fn strict() -> Self {
        Self {
            strict_mapping: true,
            require_declared_types: true,
        }
    }
}
