use std::fmt;
use std::io;

use protoroute_serialize::SerializeError;

pub const SUCCESS: i32 = 0;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const NOT_FOUND: i32 = 66;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound => NOT_FOUND,
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::InvalidData => DATA_INVALID,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn serialize_error(context: &str, err: SerializeError) -> CliError {
    match err {
        SerializeError::Io { source_name, source } => {
            io_error(&format!("{context}: {source_name}"), source)
        }
        SerializeError::MalformedMapping(_)
        | SerializeError::UndeclaredType { .. }
        | SerializeError::Decode(_)
        | SerializeError::UnregisteredType(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        SerializeError::UnknownRoute(_) => CliError::new(USAGE, format!("{context}: {err}")),
        // A route-allocated message is always registered.
        SerializeError::WrongValueType => CliError::new(INTERNAL, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_kinds_map_to_exit_codes() {
        let missing = io_error("open", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(missing.code, NOT_FOUND);
        assert_eq!(missing.to_string(), "open: gone");

        let denied = io_error("open", io::Error::new(io::ErrorKind::PermissionDenied, "no"));
        assert_eq!(denied.code, PERMISSION_DENIED);
    }

    #[test]
    fn serialize_errors_map_to_exit_codes() {
        let unknown = serialize_error("decode", SerializeError::UnknownRoute("x".to_string()));
        assert_eq!(unknown.code, USAGE);

        let undeclared = serialize_error(
            "check",
            SerializeError::UndeclaredType {
                route: "r".to_string(),
                type_name: "T".to_string(),
            },
        );
        assert_eq!(undeclared.code, DATA_INVALID);

        let wrong = serialize_error("decode", SerializeError::WrongValueType);
        assert_eq!(wrong.code, INTERNAL);
        assert_eq!(wrong.message, "decode: protobuf: convert on wrong type value");

        let unregistered = serialize_error(
            "decode",
            SerializeError::UnregisteredType("protos.Missing".to_string()),
        );
        assert_eq!(unregistered.code, DATA_INVALID);

        let read = serialize_error(
            "load",
            SerializeError::Io {
                source_name: "schema",
                source: io::Error::new(io::ErrorKind::NotFound, "missing"),
            },
        );
        assert_eq!(read.code, NOT_FOUND);
        assert_eq!(read.message, "load: schema: missing");
    }
}
