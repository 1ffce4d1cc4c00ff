use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::CatalogConfig;
use crate::error::{Result, SerializeError};
use crate::schema::SchemaOutline;

/// Message types bound to a route name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Type of the message the server side receives on this route.
    pub server: String,
    /// Type travelling in the opposite direction, when the route has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

impl RouteDescriptor {
    /// All message types named by this descriptor.
    pub fn message_types(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.server.as_str()).chain(self.client.as_deref())
    }
}

/// Immutable pair of raw schema text and raw route mapping, plus what could be
/// parsed out of them.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    protos: String,
    protos_mapping: String,
    routes: BTreeMap<String, RouteDescriptor>,
    outline: SchemaOutline,
    config: CatalogConfig,
}

impl SchemaCatalog {
    /// Read both sources to completion with the default (lenient) config.
    pub fn from_readers<S: Read, M: Read>(schema: S, mapping: M) -> Result<Self> {
        Self::from_readers_with_config(schema, mapping, CatalogConfig::default())
    }

    /// Read both sources to completion with explicit config.
    pub fn from_readers_with_config<S: Read, M: Read>(
        schema: S,
        mapping: M,
        config: CatalogConfig,
    ) -> Result<Self> {
        let protos = read_source(schema, "schema")?;
        let protos_mapping = read_source(mapping, "mapping")?;
        Self::from_strings_with_config(protos, protos_mapping, config)
    }

    /// Build from text already in memory.
    pub fn from_strings(
        protos: impl Into<String>,
        protos_mapping: impl Into<String>,
    ) -> Result<Self> {
        Self::from_strings_with_config(protos, protos_mapping, CatalogConfig::default())
    }

    /// Build from text already in memory with explicit config.
    pub fn from_strings_with_config(
        protos: impl Into<String>,
        protos_mapping: impl Into<String>,
        config: CatalogConfig,
    ) -> Result<Self> {
        let protos = protos.into();
        let protos_mapping = protos_mapping.into();

        let outline = SchemaOutline::parse(&protos);
        let routes = parse_routes(&protos_mapping, &config)?;
        if config.require_declared_types {
            check_declared(&routes, &outline)?;
        }

        tracing::debug!(
            schema_bytes = protos.len(),
            mapping_bytes = protos_mapping.len(),
            routes = routes.len(),
            messages = outline.messages.len(),
            "schema catalog loaded"
        );

        Ok(Self {
            protos,
            protos_mapping,
            routes,
            outline,
            config,
        })
    }

    /// Load the schema and mapping from files.
    pub fn from_files(schema: &Path, mapping: &Path) -> Result<Self> {
        Self::from_files_with_config(schema, mapping, CatalogConfig::default())
    }

    /// Load the schema and mapping from files with explicit config.
    pub fn from_files_with_config(
        schema: &Path,
        mapping: &Path,
        config: CatalogConfig,
    ) -> Result<Self> {
        let schema = std::fs::File::open(schema).map_err(|err| SerializeError::io("schema", err))?;
        let mapping =
            std::fs::File::open(mapping).map_err(|err| SerializeError::io("mapping", err))?;
        Self::from_readers_with_config(schema, mapping, config)
    }

    /// Raw schema text.
    pub fn protos(&self) -> &str {
        &self.protos
    }

    /// Raw route mapping text.
    pub fn protos_mapping(&self) -> &str {
        &self.protos_mapping
    }

    /// Look up the descriptor for a route by exact name.
    pub fn route(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.get(name)
    }

    pub fn has_route(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Routes ordered by name.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &RouteDescriptor)> {
        self.routes
            .iter()
            .map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    pub fn route_names(&self) -> Vec<&str> {
        self.routes.keys().map(String::as_str).collect()
    }

    /// Protobuf package declared by the schema text, if any.
    pub fn package(&self) -> Option<&str> {
        self.outline.package.as_deref()
    }

    /// Message names declared in the schema text, nested ones as `Outer.Inner`.
    pub fn declared_messages(&self) -> impl Iterator<Item = &str> {
        self.outline.messages.iter().map(String::as_str)
    }

    /// Whether the schema text declares a message type.
    pub fn declares(&self, type_name: &str) -> bool {
        self.outline.declares(type_name)
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

fn read_source<R: Read>(mut reader: R, source_name: &'static str) -> Result<String> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|err| SerializeError::io(source_name, err))?;
    Ok(content)
}

fn parse_routes(
    mapping: &str,
    config: &CatalogConfig,
) -> Result<BTreeMap<String, RouteDescriptor>> {
    match parse_route_table(mapping, config.strict_mapping) {
        Ok(routes) => Ok(routes),
        Err(err) if config.strict_mapping => Err(SerializeError::MalformedMapping(err)),
        Err(err) => {
            tracing::warn!(error = %err, "route mapping is not a descriptor table; no routes loaded");
            Ok(BTreeMap::new())
        }
    }
}

fn parse_route_table(
    mapping: &str,
    strict: bool,
) -> serde_json::Result<BTreeMap<String, RouteDescriptor>> {
    let mut deserializer = serde_json::Deserializer::from_str(mapping);
    let routes = (&mut deserializer).deserialize_map(RouteTableVisitor { strict })?;
    deserializer.end()?;
    Ok(routes)
}

fn check_declared(
    routes: &BTreeMap<String, RouteDescriptor>,
    outline: &SchemaOutline,
) -> Result<()> {
    for (route, descriptor) in routes {
        if let Some(missing) = descriptor
            .message_types()
            .find(|type_name| !outline.declares(type_name))
        {
            return Err(SerializeError::UndeclaredType {
                route: route.clone(),
                type_name: missing.to_string(),
            });
        }
    }
    Ok(())
}

/// Builds the route table entry by entry.
///
/// Strict tables fail on the first malformed descriptor or duplicate route.
/// Lenient tables skip such entries with a warning and keep the rest; a
/// duplicate route keeps its first descriptor.
struct RouteTableVisitor {
    strict: bool,
}

impl<'de> Visitor<'de> for RouteTableVisitor {
    type Value = BTreeMap<String, RouteDescriptor>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping route names to descriptors")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut routes = BTreeMap::new();
        while let Some(route) = access.next_key::<String>()? {
            let value: serde_json::Value = access.next_value()?;

            if routes.contains_key(&route) {
                if self.strict {
                    return Err(de::Error::custom(format_args!("duplicate route {route}")));
                }
                tracing::warn!(%route, "duplicate route in mapping; keeping the first descriptor");
                continue;
            }

            match RouteDescriptor::deserialize(value) {
                Ok(descriptor) => {
                    routes.insert(route, descriptor);
                }
                Err(err) if self.strict => {
                    return Err(de::Error::custom(format_args!("route {route}: {err}")));
                }
                Err(err) => {
                    tracing::warn!(%route, error = %err, "skipping malformed route descriptor");
                }
            }
        }
        Ok(routes)
    }
}
