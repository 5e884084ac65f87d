//! Mapping of TL type tokens to Swift types

use crate::error::{Error, Result};
use crate::ir::{capitalize_first, Schema};
use heck::ToLowerCamelCase;
use phf::phf_set;
use std::collections::BTreeSet;

/// Swift reserved words that need backticks when used as identifiers
static SWIFT_KEYWORDS: phf::Set<&'static str> = phf_set! {
    // Declarations
    "associatedtype", "class", "deinit", "enum", "extension", "fileprivate",
    "func", "import", "init", "inout", "internal", "let", "open", "operator",
    "private", "precedencegroup", "protocol", "public", "rethrows", "static",
    "struct", "subscript", "typealias", "var",
    // Statements
    "break", "case", "catch", "continue", "default", "defer", "do", "else",
    "fallthrough", "for", "guard", "if", "in", "repeat", "return", "throw",
    "switch", "where", "while",
    // Expressions and types
    "Any", "as", "await", "false", "is", "nil", "self", "Self", "super",
    "throws", "true", "try",
};

/// Resolves schema type tokens to Swift type expressions.
///
/// References to other declarations are only accepted when the schema
/// declares them; there is no fallback type.
#[derive(Debug, Clone)]
pub struct TypeMapper {
    known: BTreeSet<String>,
}

impl TypeMapper {
    pub fn new(schema: &Schema) -> Self {
        Self {
            known: schema.known_type_names(),
        }
    }

    pub fn with_known_types(known: BTreeSet<String>) -> Self {
        Self { known }
    }

    /// Map a type token, wrapping it as `T?` when optional.
    ///
    /// `owner` names the declaration being generated and only feeds the error.
    pub fn swift_type(&self, token: &str, optional: bool, owner: &str) -> Result<String> {
        let mapped = self
            .map_token(token, true)
            .map_err(|unknown| Error::UnknownType {
                token: unknown.to_string(),
                owner: owner.to_string(),
            })?;

        if optional {
            Ok(format!("{mapped}?"))
        } else {
            Ok(mapped)
        }
    }

    /// Map the result type of a function.
    ///
    /// A result may name a type the schema never declares, so references are
    /// capitalized without consulting the known types.
    pub fn result_type(&self, token: &str, owner: &str) -> Result<String> {
        self.map_token(token, false)
            .map_err(|unknown| Error::UnknownType {
                token: unknown.to_string(),
                owner: owner.to_string(),
            })
    }

    /// Map a token; on failure returns the innermost unmappable token
    fn map_token<'t>(
        &self,
        token: &'t str,
        require_known: bool,
    ) -> std::result::Result<String, &'t str> {
        if let Some(primitive) = primitive_type(token) {
            return Ok(primitive.to_string());
        }

        if let Some(element) = vector_element(token) {
            return Ok(format!("[{}]", self.map_token(element, require_known)?));
        }

        if !is_reference(token) {
            return Err(token);
        }

        let name = capitalize_first(token);
        if !require_known || self.known.contains(&name) {
            Ok(name)
        } else {
            Err(token)
        }
    }
}

/// A bare identifier naming another declaration
fn is_reference(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Map a TL primitive to its Swift equivalent
fn primitive_type(token: &str) -> Option<&'static str> {
    match token {
        "int32" | "#" => Some("Int"),
        "int53" => Some("Int64"),
        "int64" => Some("TdInt64"),
        "double" => Some("Double"),
        "string" => Some("String"),
        "bytes" => Some("Data"),
        "Bool" | "bool" => Some("Bool"),
        _ => None,
    }
}

/// `vector<T>` / `Vector<T>` -> `T`
fn vector_element(token: &str) -> Option<&str> {
    token
        .strip_prefix("vector<")
        .or_else(|| token.strip_prefix("Vector<"))
        .and_then(|rest| rest.strip_suffix('>'))
}

/// Convert a schema identifier to a Swift property/parameter name
/// ("chat_id" -> "chatId").
///
/// Uppercase runs are folded (`param_TTL` -> `paramTtl`). The generated
/// coders use Foundation's snake-case key strategies, which only round-trip
/// all-lowercase schema names, so a mixed-case name encodes as `param_ttl`.
pub fn property_name(name: &str) -> String {
    name.to_lower_camel_case()
}

/// Wrap a Swift reserved word in backticks
pub fn mask_keyword(ident: &str) -> String {
    if is_swift_keyword(ident) {
        format!("`{ident}`")
    } else {
        ident.to_string()
    }
}

/// Property name safe to use as a Swift identifier
pub fn sanitize_identifier(name: &str) -> String {
    mask_keyword(&property_name(name))
}

/// Check if a string is a Swift reserved word
pub fn is_swift_keyword(s: &str) -> bool {
    SWIFT_KEYWORDS.contains(s)
}
