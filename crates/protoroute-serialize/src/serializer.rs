use std::any::Any;
use std::io::Read;

use prost::{Message, Name};

use crate::catalog::SchemaCatalog;
use crate::config::CatalogConfig;
use crate::error::{Result, SerializeError};
use crate::registry::{BoxedMessage, MessageRegistry};

/// Protobuf serializer addressed by opaque values or route names.
///
/// Built once from a schema and a route mapping, then shared freely: every
/// operation takes `&self` and allocates only per-call state.
#[derive(Debug, Clone)]
pub struct Serializer {
    catalog: SchemaCatalog,
    registry: MessageRegistry,
}

impl Serializer {
    /// Read both sources and bind the bundled message types.
    pub fn from_readers<S: Read, M: Read>(schema: S, mapping: M) -> Result<Self> {
        Self::builder().build(schema, mapping)
    }

    pub fn builder() -> SerializerBuilder {
        SerializerBuilder::default()
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &MessageRegistry {
        &self.registry
    }

    /// Encode any value whose concrete type is a registered message.
    ///
    /// A `Box<M>` or a [`BoxedMessage`] from [`Serializer::new_message`] is
    /// encoded as the message it holds. Other values fail with [`SerializeError::WrongValueType`] and produce no
    /// bytes.
    pub fn marshal(&self, value: &dyn Any) -> Result<Vec<u8>> {
        self.registry.encode(value)
    }

    /// Decode `data` into `dest`, which must be a registered message, a
    /// `Box<M>` of one, or a [`BoxedMessage`] holding one.
    ///
    /// On success every field of `dest` is replaced; fields absent from the
    /// encoding end up at their default. On any error `dest` is unchanged.
    pub fn unmarshal(&self, data: &[u8], dest: &mut dyn Any) -> Result<()> {
        self.registry.decode_into(data, dest)
    }

    /// Encode a message whose type is known at compile time.
    pub fn marshal_message<M: Message>(&self, message: &M) -> Vec<u8> {
        message.encode_to_vec()
    }

    /// Decode a message whose type is known at compile time.
    pub fn unmarshal_message<M: Message + Default>(&self, data: &[u8]) -> Result<M> {
        Ok(M::decode(data)?)
    }

    /// Server-side message type mapped to a route.
    pub fn route_type(&self, route: &str) -> Result<&str> {
        self.catalog
            .route(route)
            .map(|descriptor| descriptor.server.as_str())
            .ok_or_else(|| SerializeError::UnknownRoute(route.to_string()))
    }

    /// Allocate a default value of the type a route maps to.
    pub fn new_message(&self, route: &str) -> Result<BoxedMessage> {
        let type_name = self.route_type(route)?;
        self.registry.allocate(type_name)
    }

    /// Decode bytes addressed only by route name.
    pub fn unmarshal_route(&self, route: &str, data: &[u8]) -> Result<BoxedMessage> {
        let mut message = self.new_message(route)?;
        self.unmarshal(data, &mut message)?;
        Ok(message)
    }

    /// Full protobuf name of a value's type, if it is a registered message.
    pub fn message_type_name(&self, value: &dyn Any) -> Option<&str> {
        self.registry.type_name(value)
    }

    /// Debug rendering of a registered message.
    pub fn describe(&self, value: &dyn Any) -> Option<String> {
        self.registry.describe(value)
    }
}

/// Configures a [`Serializer`] before its sources are read.
#[derive(Debug)]
pub struct SerializerBuilder {
    config: CatalogConfig,
    builtin_types: bool,
    extra: MessageRegistry,
}

impl Default for SerializerBuilder {
    fn default() -> Self {
        Self {
            config: CatalogConfig::default(),
            builtin_types: true,
            extra: MessageRegistry::new(),
        }
    }
}

impl SerializerBuilder {
    pub fn config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Accept an application message type in addition to the bundled ones.
    pub fn register<M>(mut self) -> Self
    where
        M: Message + Name + Default + 'static,
    {
        self.extra.register::<M>();
        self
    }

    /// Only accept explicitly registered types.
    pub fn without_builtin_types(mut self) -> Self {
        self.builtin_types = false;
        self
    }

    pub fn build<S: Read, M: Read>(self, schema: S, mapping: M) -> Result<Serializer> {
        let catalog = SchemaCatalog::from_readers_with_config(schema, mapping, self.config)?;
        Ok(self.finish(catalog))
    }

    /// Bind an already loaded catalog.
    pub fn build_with_catalog(self, catalog: SchemaCatalog) -> Serializer {
        self.finish(catalog)
    }

    fn finish(self, catalog: SchemaCatalog) -> Serializer {
        let mut registry = if self.builtin_types {
            MessageRegistry::with_builtin_types()
        } else {
            MessageRegistry::new()
        };
        registry.merge(&self.extra);

        for (route, descriptor) in catalog.routes() {
            if !registry.contains(&descriptor.server) {
                tracing::warn!(
                    route,
                    message_type = %descriptor.server,
                    "route maps to a message type with no registered codec"
                );
            }
        }

        tracing::debug!(
            routes = catalog.route_names().len(),
            message_types = registry.len(),
            "serializer ready"
        );

        Serializer { catalog, registry }
    }
}
