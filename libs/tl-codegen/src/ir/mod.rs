//! Intermediate Representation (IR)
//!
//! Language-agnostic representation of the declarations found in a TL schema.
//! The parser builds it once; generators only read it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything extracted from one TL schema, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Data types and functions, in the order they appear in the schema
    pub classes: Vec<ClassInfo>,
    /// Union types documented with `//@class`
    pub abstract_classes: Vec<AbstractClass>,
}

impl Schema {
    /// All function declarations (declared after `---functions---`)
    pub fn functions(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.iter().filter(|c| c.is_function)
    }

    /// All data type declarations
    pub fn types(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.iter().filter(|c| !c.is_function)
    }

    /// Look up the `//@class` documentation for a union type
    pub fn abstract_class(&self, name: &str) -> Option<&AbstractClass> {
        self.abstract_classes.iter().find(|c| c.name == name)
    }

    /// Names a type token may legally reference.
    ///
    /// Declaration names are included capitalized, the way the generators
    /// spell them; root names and abstract classes are already capitalized.
    pub fn known_type_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for class in self.types() {
            names.insert(capitalize_first(&class.name));
            names.insert(class.root_name.clone());
        }
        for class in &self.abstract_classes {
            names.insert(class.name.clone());
        }
        names
    }
}

/// A single declaration: either a data type constructor or a remote method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    /// Declared identifier (e.g., "getChat", "authenticationCodeTypeSms")
    pub name: String,
    /// Result type for functions, parent union type for data constructors
    pub root_name: String,
    /// Documentation from the preceding comment run (may be empty)
    pub description: String,
    /// Whether this declares a remote method
    pub is_function: bool,
    /// Fields/parameters in declaration order
    pub properties: Vec<Property>,
}

impl ClassInfo {
    /// Swift type name for this declaration ("getChat" -> "GetChat")
    pub fn type_name(&self) -> String {
        capitalize_first(&self.name)
    }

    /// Whether this constructor is the only shape of its root type
    /// (`error code:int32 message:string = Error;`)
    pub fn is_standalone(&self) -> bool {
        self.type_name() == self.root_name
    }
}

/// A field of a data type or a parameter of a function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Schema-cased name (e.g., "chat_id")
    pub name: String,
    /// Schema type token (e.g., "int53", "vector<message>")
    pub type_name: String,
    /// Whether the value may be absent
    pub optional: bool,
    /// Parameter documentation
    pub description: Option<String>,
}

/// Documentation of a union type (`//@class Name @description ...`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractClass {
    pub name: String,
    pub description: String,
}

/// Capitalize the first letter of a string
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str, root: &str, is_function: bool) -> ClassInfo {
        ClassInfo {
            name: name.to_string(),
            root_name: root.to_string(),
            description: String::new(),
            is_function,
            properties: Vec::new(),
        }
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("getChat"), "GetChat");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("Ok"), "Ok");
    }

    #[test]
    fn test_known_type_names_excludes_functions() {
        let schema = Schema {
            classes: vec![
                class("ok", "Ok", false),
                class("userTypeBot", "UserType", false),
                class("getMe", "User", true),
            ],
            abstract_classes: vec![AbstractClass {
                name: "ChatType".to_string(),
                description: String::new(),
            }],
        };

        let known = schema.known_type_names();
        assert!(known.contains("Ok"));
        assert!(known.contains("UserTypeBot"));
        assert!(known.contains("UserType"));
        assert!(known.contains("ChatType"));
        assert!(!known.contains("GetMe"));
    }

    #[test]
    fn test_standalone_detection() {
        assert!(class("error", "Error", false).is_standalone());
        assert!(!class("userTypeBot", "UserType", false).is_standalone());
    }
}
