//! Parser for TL schemas
//!
//! Reads the line-oriented TL format used by TDLib (`td_api.tl`) and builds
//! the intermediate representation (IR) consumed by the generators.
//!
//! Each significant line is either a comment, a section divider or a
//! declaration. Comment runs document the declaration that follows them;
//! `---functions---` switches every following declaration to a function.

mod docs;

use crate::error::{Error, Result};
use crate::ir::{AbstractClass, ClassInfo, Property, Schema};
use docs::Docs;

const FUNCTIONS_DIVIDER: &str = "---functions---";
const TYPES_DIVIDER: &str = "---types---";

/// Result types of the primitive declarations at the top of `td_api.tl`
const BUILTIN_ROOTS: &[&str] = &[
    "Double", "String", "Int32", "Int53", "Int64", "Bytes", "Bool",
];

/// Parse a complete TL schema.
///
/// Either every declaration is well formed and the full schema is returned,
/// or the first malformed line is reported and nothing is returned.
pub fn parse(text: &str) -> Result<Schema> {
    let mut parser = Parser::default();
    for (index, line) in text.lines().enumerate() {
        parser.parse_line(index + 1, line)?;
    }
    Ok(parser.finish())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Section {
    #[default]
    Types,
    Functions,
}

#[derive(Debug, Default)]
struct Parser {
    section: Section,
    /// Contiguous comment lines not yet attached to a declaration
    comments: Vec<String>,
    schema: Schema,
}

impl Parser {
    fn parse_line(&mut self, line_no: usize, raw: &str) -> Result<()> {
        let line = raw.trim();

        if line.is_empty() {
            self.flush_comments();
            return Ok(());
        }

        if let Some(comment) = line.strip_prefix("//") {
            self.push_comment(comment);
            return Ok(());
        }

        if line.starts_with("---") {
            self.flush_comments();
            return self.switch_section(line_no, line);
        }

        let docs = self.take_docs();
        self.parse_declaration(line_no, line, docs)
    }

    fn push_comment(&mut self, comment: &str) {
        // `//-` continues the previous comment line
        match (comment.strip_prefix('-'), self.comments.last_mut()) {
            (Some(rest), Some(previous)) => {
                previous.push(' ');
                previous.push_str(rest.trim());
            }
            (Some(rest), None) => self.comments.push(rest.trim().to_string()),
            (None, _) => self.comments.push(comment.trim().to_string()),
        }
    }

    /// Consume the pending comment run.
    ///
    /// A `@class` run documents a union type and is registered here instead
    /// of being handed to the next declaration.
    fn take_docs(&mut self) -> Docs {
        if self.comments.is_empty() {
            return Docs::default();
        }
        let docs = Docs::parse(&std::mem::take(&mut self.comments));
        if let Some(name) = &docs.class_name {
            self.schema.abstract_classes.push(AbstractClass {
                name: name.clone(),
                description: docs.description.clone(),
            });
            return Docs::default();
        }
        docs
    }

    fn flush_comments(&mut self) {
        let _ = self.take_docs();
    }

    fn switch_section(&mut self, line_no: usize, line: &str) -> Result<()> {
        match (line, self.section) {
            (FUNCTIONS_DIVIDER, Section::Types) => {
                tracing::debug!(line = line_no, "switching to function declarations");
                self.section = Section::Functions;
                Ok(())
            }
            (FUNCTIONS_DIVIDER, Section::Functions) => Err(Error::parse(
                line_no,
                "duplicate '---functions---' divider",
            )),
            (TYPES_DIVIDER, Section::Types) => Ok(()),
            (TYPES_DIVIDER, Section::Functions) => Err(Error::parse(
                line_no,
                "'---types---' after '---functions---' is not supported",
            )),
            _ => Err(Error::parse(
                line_no,
                format!("unknown section divider '{line}'"),
            )),
        }
    }

    fn parse_declaration(&mut self, line_no: usize, line: &str, docs: Docs) -> Result<()> {
        let (statement, trailing_comment) = match line.find("//") {
            Some(index) => (line[..index].trim_end(), Some(line[index + 2..].trim())),
            None => (line, None),
        };

        let body = statement
            .strip_suffix(';')
            .ok_or_else(|| Error::parse(line_no, "missing ';' terminator"))?;

        let mut halves = body.split('=');
        let left = halves.next().unwrap_or_default().trim();
        let root_name = halves
            .next()
            .ok_or_else(|| Error::parse(line_no, "missing '=' before result type"))?
            .trim();
        if halves.next().is_some() {
            return Err(Error::parse(line_no, "more than one '=' in declaration"));
        }

        let mut tokens = left.split_whitespace();
        let raw_name = tokens
            .next()
            .ok_or_else(|| Error::parse(line_no, "missing declaration name"))?;
        let params: Vec<&str> = tokens.collect();

        let builtin_root = self.section == Section::Types && BUILTIN_ROOTS.contains(&root_name);
        if builtin_root || is_builtin(&params) {
            tracing::trace!(line = line_no, name = raw_name, "skipping built-in declaration");
            return Ok(());
        }

        let name = strip_constructor_id(raw_name);
        if !is_identifier(name) {
            return Err(Error::parse(
                line_no,
                format!("invalid declaration name '{raw_name}'"),
            ));
        }
        if root_name.is_empty() {
            return Err(Error::parse(line_no, "missing result type after '='"));
        }
        if !is_type_token(root_name) {
            return Err(Error::parse(
                line_no,
                format!("invalid result type '{root_name}'"),
            ));
        }

        let mut properties: Vec<Property> = Vec::with_capacity(params.len());
        for token in params {
            let property = parse_parameter(line_no, token, &docs)?;
            if properties.iter().any(|p| p.name == property.name) {
                return Err(Error::parse(
                    line_no,
                    format!("duplicate parameter '{}'", property.name),
                ));
            }
            properties.push(property);
        }

        // A trailing `// text` documents the last parameter, or the
        // declaration itself when it has none
        let mut description = docs.description;
        match (trailing_comment, properties.last_mut()) {
            (Some(comment), Some(last)) if last.description.is_none() && !comment.is_empty() => {
                last.optional |= marks_nullable(comment);
                last.description = Some(comment.to_string());
            }
            (Some(comment), None) if description.is_empty() => {
                description = comment.to_string();
            }
            _ => {}
        }

        self.schema.classes.push(ClassInfo {
            name: name.to_string(),
            root_name: root_name.to_string(),
            description,
            is_function: self.section == Section::Functions,
            properties,
        });

        Ok(())
    }

    fn finish(mut self) -> Schema {
        self.flush_comments();
        tracing::debug!(
            types = self.schema.types().count(),
            functions = self.schema.functions().count(),
            abstract_classes = self.schema.abstract_classes.len(),
            "parsed TL schema"
        );
        self.schema
    }
}

/// Parse a `name:type` parameter token
fn parse_parameter(line_no: usize, token: &str, docs: &Docs) -> Result<Property> {
    let (name, ty) = token.split_once(':').ok_or_else(|| {
        Error::parse(
            line_no,
            format!("malformed parameter '{token}', expected name:type"),
        )
    })?;

    if !is_identifier(name) {
        return Err(Error::parse(
            line_no,
            format!("invalid parameter name in '{token}'"),
        ));
    }

    // Bit-flag field presence: `flags.0?string`
    let (type_name, flagged) = match ty.split_once('?') {
        Some((flag, inner)) if is_flag_reference(flag) => (inner, true),
        Some(_) => {
            return Err(Error::parse(
                line_no,
                format!("malformed conditional type in '{token}'"),
            ))
        }
        None => (ty, false),
    };

    if !is_type_token(type_name) {
        return Err(Error::parse(
            line_no,
            format!("invalid type in parameter '{token}'"),
        ));
    }

    let description = docs.params.get(name).cloned();
    let optional = flagged || description.as_deref().is_some_and(marks_nullable);

    Ok(Property {
        name: name.to_string(),
        type_name: type_name.to_string(),
        optional,
        description,
    })
}

/// `double ? = Double;` and `vector {t:Type} # [ t ] = Vector t;`
fn is_builtin(params: &[&str]) -> bool {
    params == ["?"] || params.iter().any(|p| p.starts_with('{'))
}

/// Drop an MTProto constructor id (`user#d23c81a3` -> `user`)
fn strip_constructor_id(name: &str) -> &str {
    match name.split_once('#') {
        Some((base, id)) if !id.is_empty() && id.chars().all(|c| c.is_ascii_hexdigit()) => base,
        _ => name,
    }
}

/// TDLib documents nullable fields in prose
fn marks_nullable(description: &str) -> bool {
    description.contains("may be null") || description.contains("pass null")
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn is_flag_reference(s: &str) -> bool {
    match s.split_once('.') {
        Some((field, bit)) => {
            is_identifier(field) && !bit.is_empty() && bit.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Identifier, `#`, or a parameterized type such as `vector<vector<string>>`
fn is_type_token(s: &str) -> bool {
    if s == "#" {
        return true;
    }
    let mut depth: i32 = 0;
    for c in s.chars() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            c if c.is_ascii_alphanumeric() || c == '_' => {}
            _ => return false,
        }
    }
    depth == 0 && s.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}
