//! Route-addressed protobuf serialization backed by a schema catalog.
//!
//! A [`Serializer`] is built once from two text sources: a `.proto` schema and
//! a JSON route mapping such as `{"onNewUser": {"server": "Response"}}`. After
//! that it encodes and decodes values without knowing their type at compile
//! time. Values are accepted only if their concrete type is a registered
//! message; anything else fails with [`SerializeError::WrongValueType`].
//!
//! ```no_run
//! use protoroute_serialize::{protos::Response, Serializer};
//!
//! let schema = std::fs::File::open("proto/protos.proto")?;
//! let mapping = r#"{"onNewUser": {"server": "Response"}}"#.as_bytes();
//! let serializer = Serializer::from_readers(schema, mapping)?;
//!
//! let data = serializer.marshal(&Response { data: b"data".to_vec(), error: String::new() })?;
//! let mut dest = Response::default();
//! serializer.unmarshal(&data, &mut dest)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod registry;
mod schema;
pub mod serializer;

/// Message types compiled from the bundled `proto/protos.proto`.
pub mod protos {
    include!("proto/protos.rs");
}

pub use catalog::{RouteDescriptor, SchemaCatalog};
pub use config::CatalogConfig;
pub use error::{Result, SerializeError};
pub use registry::{BoxedMessage, MessageRegistry};
pub use serializer::{Serializer, SerializerBuilder};
