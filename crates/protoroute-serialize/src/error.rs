/// Errors that can occur while building a catalog or moving messages on the wire.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// A schema or mapping source could not be read to completion.
    #[error("failed to read {source_name} source: {source}")]
    Io {
        source_name: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The route mapping is not a JSON object of route descriptors.
    #[error("malformed route mapping: {0}")]
    MalformedMapping(#[from] serde_json::Error),

    /// A route points at a message type the schema does not declare.
    #[error("route {route} references undeclared message type {type_name}")]
    UndeclaredType { route: String, type_name: String },

    /// The value is not a registered schema-backed message.
    #[error("protobuf: convert on wrong type value")]
    WrongValueType,

    /// The bytes are not a valid encoding of the destination type.
    #[error("failed to decode message: {0}")]
    Decode(#[from] prost::DecodeError),

    /// No descriptor is mapped to the route name.
    #[error("no message mapped to route {0}")]
    UnknownRoute(String),

    /// The route maps to a type the serializer has no codec for.
    #[error("message type {0} is not registered")]
    UnregisteredType(String),
}

impl SerializeError {
    pub(crate) fn io(source_name: &'static str, source: std::io::Error) -> Self {
        Self::Io {
            source_name,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SerializeError>;
