use std::collections::BTreeSet;

/// Package and message names declared by a `.proto` text.
///
/// Extraction is lenient: text that is not protobuf yields an empty outline
/// rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SchemaOutline {
    pub package: Option<String>,
    pub messages: BTreeSet<String>,
}

impl SchemaOutline {
    pub fn parse(text: &str) -> Self {
        let tokens = tokenize(text);
        let mut outline = Self::default();
        // One entry per open brace; `Some` only for message bodies.
        let mut scopes: Vec<Option<String>> = Vec::new();
        let mut pending: Option<String> = None;
        let mut iter = tokens.iter().copied().peekable();

        while let Some(token) = iter.next() {
            match token {
                "{" => {
                    if let Some(name) = &pending {
                        let qualified = scopes
                            .iter()
                            .flatten()
                            .map(String::as_str)
                            .chain(std::iter::once(name.as_str()))
                            .collect::<Vec<_>>()
                            .join(".");
                        outline.messages.insert(qualified);
                    }
                    scopes.push(pending.take());
                }
                "}" => {
                    scopes.pop();
                    pending = None;
                }
                ";" => pending = None,
                "message" => {
                    if let Some(name) = iter.next_if(|next| is_identifier(next)) {
                        pending = Some(name.to_string());
                    }
                }
                "package" if scopes.is_empty() => {
                    if let Some(name) = iter.next_if(|next| is_qualified_identifier(next)) {
                        outline.package = Some(name.to_string());
                    }
                }
                _ => {}
            }
        }

        outline
    }

    /// Check a bare (`Response`), package-qualified (`protos.Response`) or
    /// fully-qualified (`.protos.Response`) type name.
    pub fn declares(&self, type_name: &str) -> bool {
        let name = type_name.strip_prefix('.').unwrap_or(type_name);
        if self.messages.contains(name) {
            return true;
        }

        match &self.package {
            Some(package) => name
                .strip_prefix(package.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|rest| self.messages.contains(rest)),
            None => false,
        }
    }
}

fn tokenize(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
            }
            b'"' | b'\'' => {
                let start = i;
                i += 1;
                while i < bytes.len() && bytes[i] != b {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i = (i + 1).min(bytes.len());
                tokens.push(&text[start..i]);
            }
            _ if b.is_ascii_whitespace() => i += 1,
            _ if is_punctuation(b) => {
                tokens.push(&text[i..i + 1]);
                i += 1;
            }
            _ => {
                let start = i;
                while i < bytes.len() && is_word_byte(bytes[i]) {
                    i += 1;
                }
                if i == start {
                    // Lone '/' that does not open a comment.
                    i += 1;
                }
                tokens.push(&text[start..i]);
            }
        }
    }

    tokens
}

fn is_punctuation(b: u8) -> bool {
    b"{};=()[]<>,".contains(&b)
}

fn is_word_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && !is_punctuation(b) && !b"\"'/".contains(&b)
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_qualified_identifier(token: &str) -> bool {
    token.split('.').all(is_identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
        syntax = "proto3";
        package protos;

        // message Commented { }
        enum MsgType {
          MsgRequest = 0;
        }

        message Request {
          string message = 1; /* message Hidden { } */
          map<string, string> metadata = 2 [json_name = "meta{"];
          message Header {
            message Entry {}
          }
        }

        message Response {
          bytes data = 1;
          string error = 2;
        }
    "#;

    #[test]
    fn collects_package_and_messages() {
        let outline = SchemaOutline::parse(SCHEMA);

        assert_eq!(outline.package.as_deref(), Some("protos"));
        let names: Vec<&str> = outline.messages.iter().map(String::as_str).collect();
        assert_eq!(
            names,
            vec!["Request", "Request.Header", "Request.Header.Entry", "Response"]
        );
    }

    #[test]
    fn declares_accepts_qualified_names() {
        let outline = SchemaOutline::parse(SCHEMA);

        assert!(outline.declares("Response"));
        assert!(outline.declares("protos.Response"));
        assert!(outline.declares(".protos.Request.Header"));
        assert!(!outline.declares("other.Response"));
        assert!(!outline.declares("MsgType"));
        assert!(!outline.declares("Hidden"));
    }

    #[test]
    fn non_protobuf_text_yields_empty_outline() {
        let outline = SchemaOutline::parse("protos");
        assert_eq!(outline, SchemaOutline::default());

        let outline = SchemaOutline::parse("message { / \"unterminated");
        assert!(outline.messages.is_empty());
    }
}
