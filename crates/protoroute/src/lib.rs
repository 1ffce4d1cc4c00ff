//! Route-addressed protobuf serialization.
//!
//! protoroute lets RPC dispatch code encode and decode messages addressed by a
//! route name (`"onNewUser"`) instead of a compile-time type. A JSON route
//! mapping binds each route to a protobuf message type; the serializer checks
//! at runtime that every value it touches is a registered message.
//!
//! # Crate Structure
//!
//! - [`serialize`] — Schema catalog, message registry and serializer
//!
//! The `cli` feature builds the `protoroute` binary for inspecting catalogs and
//! decoding captured payloads.

/// Re-export serializer types.
pub mod serialize {
    pub use protoroute_serialize::*;
}

pub use protoroute_serialize::{SerializeError, Serializer};
