use std::any::{Any, TypeId};
use std::collections::HashMap;

use prost::{DecodeError, Message, Name};

use crate::error::{Result, SerializeError};
use crate::protos;

/// A freshly allocated message whose concrete type was chosen at runtime.
pub type BoxedMessage = Box<dyn Any + Send + Sync>;

/// Type-erased encode/decode entry points for one message type.
#[derive(Clone)]
struct MessageCodec {
    name: &'static str,
    full_name: String,
    boxed_id: TypeId,
    encode: fn(&dyn Any) -> Option<Vec<u8>>,
    decode: fn(&[u8], &mut dyn Any) -> Option<std::result::Result<(), DecodeError>>,
    allocate: fn() -> BoxedMessage,
    describe: fn(&dyn Any) -> Option<String>,
}

/// `TypeId`-keyed set of the message types a serializer accepts.
///
/// Membership is the runtime "is a schema-backed message" check: any value
/// whose concrete type was never registered is rejected with
/// [`SerializeError::WrongValueType`]. A registered `M`, a `Box<M>` and a
/// [`BoxedMessage`] holding an `M` are all accepted.
#[derive(Clone, Default)]
pub struct MessageRegistry {
    codecs: HashMap<TypeId, MessageCodec>,
    // `Box<M>` type id -> `M` type id.
    boxed: HashMap<TypeId, TypeId>,
    names: HashMap<String, TypeId>,
}

impl MessageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every message type of the bundled `protos` schema.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        registry.register::<protos::Msg>();
        registry.register::<protos::Session>();
        registry.register::<protos::Request>();
        registry.register::<protos::Response>();
        registry.register::<protos::Push>();
        registry.register::<protos::KickMsg>();
        registry.register::<protos::KickAnswer>();
        registry.register::<protos::BindMsg>();
        registry
    }

    /// Register a message type.
    ///
    /// The type becomes addressable by its full name (`protos.Response`) and,
    /// unless another type already claimed it, by its bare name (`Response`).
    /// A full name belongs to one Rust type: registering a second type under
    /// the same full name replaces the first.
    pub fn register<M>(&mut self)
    where
        M: Message + Name + Default + 'static,
    {
        self.insert_codec(
            TypeId::of::<M>(),
            MessageCodec {
                name: M::NAME,
                full_name: M::full_name(),
                boxed_id: TypeId::of::<Box<M>>(),
                encode: encode_erased::<M>,
                decode: decode_erased::<M>,
                allocate: allocate_erased::<M>,
                describe: describe_erased::<M>,
            },
        );
    }

    /// Add every type from `other`; existing bare names are kept.
    pub fn merge(&mut self, other: &MessageRegistry) {
        for (type_id, codec) in &other.codecs {
            self.insert_codec(*type_id, codec.clone());
        }
    }

    fn insert_codec(&mut self, type_id: TypeId, codec: MessageCodec) {
        if let Some(&previous) = self.names.get(&codec.full_name) {
            if previous != type_id {
                tracing::warn!(
                    message_type = %codec.full_name,
                    "message type name registered by a second Rust type; replacing the first"
                );
                self.forget(previous);
            }
        }

        self.names.insert(codec.full_name.clone(), type_id);
        self.names.entry(codec.name.to_string()).or_insert(type_id);
        self.boxed.insert(codec.boxed_id, type_id);
        self.codecs.insert(type_id, codec);
    }

    fn forget(&mut self, type_id: TypeId) {
        self.codecs.remove(&type_id);
        self.boxed.retain(|_, inner| *inner != type_id);
        self.names.retain(|_, registered| *registered != type_id);
    }

    fn codec_for(&self, value: &dyn Any) -> Option<&MessageCodec> {
        let type_id = (*value).type_id();
        self.codecs.get(&type_id).or_else(|| {
            self.boxed
                .get(&type_id)
                .and_then(|inner| self.codecs.get(inner))
        })
    }

    /// Whether the value's concrete type is a registered message.
    pub fn is_message(&self, value: &dyn Any) -> bool {
        self.codec_for(unbox(value)).is_some()
    }

    /// Whether a message type is registered under this bare or full name.
    pub fn contains(&self, type_name: &str) -> bool {
        self.names.contains_key(normalize(type_name))
    }

    /// Full protobuf name of the value's type, if registered.
    pub fn type_name(&self, value: &dyn Any) -> Option<&str> {
        self.codec_for(unbox(value))
            .map(|codec| codec.full_name.as_str())
    }

    /// Full names of all registered types, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .codecs
            .values()
            .map(|codec| codec.full_name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Allocate a default-valued message of the named type.
    pub fn allocate(&self, type_name: &str) -> Result<BoxedMessage> {
        let codec = self
            .names
            .get(normalize(type_name))
            .and_then(|type_id| self.codecs.get(type_id))
            .ok_or_else(|| SerializeError::UnregisteredType(type_name.to_string()))?;
        Ok((codec.allocate)())
    }

    /// Debug rendering of a registered message.
    pub fn describe(&self, value: &dyn Any) -> Option<String> {
        let value = unbox(value);
        let codec = self.codec_for(value)?;
        (codec.describe)(value)
    }

    pub(crate) fn encode(&self, value: &dyn Any) -> Result<Vec<u8>> {
        let value = unbox(value);
        self.codec_for(value)
            .and_then(|codec| (codec.encode)(value))
            .ok_or_else(|| {
                tracing::trace!("rejected marshal of unregistered value type");
                SerializeError::WrongValueType
            })
    }

    pub(crate) fn decode_into(&self, data: &[u8], dest: &mut dyn Any) -> Result<()> {
        if let Some(inner) = dest.downcast_mut::<BoxedMessage>() {
            return self.decode_into(data, &mut **inner);
        }

        let codec = self.codec_for(dest).ok_or_else(|| {
            tracing::trace!("rejected unmarshal into unregistered destination type");
            SerializeError::WrongValueType
        })?;

        match (codec.decode)(data, dest) {
            Some(result) => result.map_err(SerializeError::from),
            None => Err(SerializeError::WrongValueType),
        }
    }
}

impl std::fmt::Debug for MessageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}

fn normalize(type_name: &str) -> &str {
    type_name.strip_prefix('.').unwrap_or(type_name)
}

/// Look through a [`BoxedMessage`] to the value it holds.
fn unbox(value: &dyn Any) -> &dyn Any {
    match value.downcast_ref::<BoxedMessage>() {
        Some(inner) => unbox(&**inner),
        None => value,
    }
}

fn message_ref<M: 'static>(value: &dyn Any) -> Option<&M> {
    value
        .downcast_ref::<M>()
        .or_else(|| value.downcast_ref::<Box<M>>().map(|boxed| &**boxed))
}

fn encode_erased<M: Message + 'static>(value: &dyn Any) -> Option<Vec<u8>> {
    message_ref::<M>(value).map(|message| message.encode_to_vec())
}

// Decodes into a fresh value so a wire error leaves the destination untouched.
fn decode_erased<M: Message + Default + 'static>(
    data: &[u8],
    dest: &mut dyn Any,
) -> Option<std::result::Result<(), DecodeError>> {
    let dest: &mut M = if dest.is::<M>() {
        dest.downcast_mut::<M>()?
    } else {
        &mut **dest.downcast_mut::<Box<M>>()?
    };
    Some(M::decode(data).map(|decoded| *dest = decoded))
}

fn allocate_erased<M: Message + Default + 'static>() -> BoxedMessage {
    Box::new(M::default())
}

fn describe_erased<M: Message + 'static>(value: &dyn Any) -> Option<String> {
    message_ref::<M>(value).map(|message| format!("{message:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protos::{KickAnswer, Response};

    #[test]
    fn builtin_types_are_registered_by_both_names() {
        let registry = MessageRegistry::with_builtin_types();

        assert_eq!(registry.len(), 8);
        assert!(registry.contains("Response"));
        assert!(registry.contains("protos.Response"));
        assert!(registry.contains(".protos.KickAnswer"));
        assert!(!registry.contains("Unknown"));
        assert_eq!(registry.type_names()[0], "protos.BindMsg");
    }

    #[test]
    fn membership_follows_concrete_type() {
        let registry = MessageRegistry::with_builtin_types();
        let response = Response::default();

        assert!(registry.is_message(&response));
        assert!(!registry.is_message(&"invalid"));
        assert!(!registry.is_message(&String::from("invalid")));
        assert!(registry.is_message(&Box::new(Response::default())));
        assert!(!registry.is_message(&Box::new(String::from("invalid"))));
        assert_eq!(registry.type_name(&response), Some("protos.Response"));
        assert_eq!(registry.type_name(&42u32), None);
    }

    #[test]
    fn allocate_returns_default_message() {
        let registry = MessageRegistry::with_builtin_types();

        let boxed = registry.allocate("KickAnswer").unwrap();
        assert_eq!(boxed.downcast_ref::<KickAnswer>(), Some(&KickAnswer::default()));

        assert!(matches!(
            registry.allocate("protos.Missing"),
            Err(SerializeError::UnregisteredType(name)) if name == "protos.Missing"
        ));
    }

    #[test]
    fn describe_renders_registered_values_only() {
        let registry = MessageRegistry::with_builtin_types();
        let answer = KickAnswer { kicked: true };

        let rendered = registry.describe(&answer).unwrap();
        assert!(rendered.contains("kicked: true"));
        assert!(registry.describe(&"invalid").is_none());
    }

    #[test]
    fn merge_keeps_existing_bare_names() {
        let mut base = MessageRegistry::new();
        base.register::<Response>();

        let mut extra = MessageRegistry::new();
        extra.register::<KickAnswer>();
        base.merge(&extra);

        assert_eq!(base.len(), 2);
        assert!(base.contains("KickAnswer"));
        assert!(base.contains("protos.Response"));
    }

    #[test]
    fn empty_registry_rejects_everything() {
        let registry = MessageRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.encode(&Response::default()),
            Err(SerializeError::WrongValueType)
        ));
    }

    #[test]
    fn boxed_values_resolve_to_the_inner_message() {
        let registry = MessageRegistry::with_builtin_types();
        let answer = KickAnswer { kicked: true };
        let expected = answer.encode_to_vec();

        let boxed_answer = Box::new(answer);
        assert_eq!(registry.encode(&boxed_answer).unwrap(), expected);

        let erased: BoxedMessage = Box::new(answer);
        assert!(registry.is_message(&erased));
        assert_eq!(registry.type_name(&erased), Some("protos.KickAnswer"));
        assert_eq!(registry.encode(&erased).unwrap(), expected);
        assert!(registry.describe(&erased).unwrap().contains("kicked: true"));

        let mut boxed_dest = Box::new(KickAnswer::default());
        registry.decode_into(&expected, &mut boxed_dest).unwrap();
        assert_eq!(*boxed_dest, answer);

        let mut erased_dest = registry.allocate("KickAnswer").unwrap();
        registry.decode_into(&expected, &mut erased_dest).unwrap();
        assert_eq!(erased_dest.downcast_ref::<KickAnswer>(), Some(&answer));

        let mut not_a_message: BoxedMessage = Box::new(String::from("invalid"));
        assert!(matches!(
            registry.decode_into(&expected, &mut not_a_message),
            Err(SerializeError::WrongValueType)
        ));
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    struct ShadowResponse {
        #[prost(string, tag = "1")]
        note: String,
    }

    impl Name for ShadowResponse {
        const NAME: &'static str = "Response";
        const PACKAGE: &'static str = "protos";
    }

    #[test]
    fn reused_full_name_replaces_previous_type() {
        let mut registry = MessageRegistry::new();
        registry.register::<Response>();
        registry.register::<ShadowResponse>();

        assert_eq!(registry.len(), 1);
        assert!(!registry.is_message(&Response::default()));
        assert!(!registry.is_message(&Box::new(Response::default())));
        assert!(registry.is_message(&ShadowResponse::default()));

        for name in ["Response", "protos.Response"] {
            let allocated = registry.allocate(name).unwrap();
            assert!(allocated.downcast_ref::<ShadowResponse>().is_some(), "{name}");
        }
    }
}
