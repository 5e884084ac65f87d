//! Data type generation: structs for constructors and request types,
//! enums for union types.

use super::doc_comment;
use super::types::{mask_keyword, sanitize_identifier, TypeMapper};
use crate::error::{Error, Result};
use crate::generators::Composer;
use crate::ir::{ClassInfo, Schema};
use crate::source::Source;

const CONFORMANCES: &str = "Codable, Equatable, Hashable";

/// One Swift type to be written to its own file
pub enum Model<'a> {
    Struct(&'a ClassInfo),
    Enum(UnionType<'a>),
}

impl Model<'_> {
    /// Swift type name, also used as the file name
    pub fn name(&self) -> String {
        match self {
            Model::Struct(info) => info.type_name(),
            Model::Enum(union) => union.name.clone(),
        }
    }
}

/// A root type with several constructors, rendered as a Swift enum
pub struct UnionType<'a> {
    pub name: String,
    pub description: String,
    pub variants: Vec<&'a ClassInfo>,
}

/// Collect the Swift types needed for the data declarations of a schema.
///
/// Constructors come first in declaration order, followed by union types in
/// the order their root first appears.
pub fn collect_models(schema: &Schema) -> Result<Vec<Model<'_>>> {
    let mut models: Vec<Model<'_>> = Vec::new();
    let mut unions: Vec<UnionType<'_>> = Vec::new();

    for info in schema.types() {
        models.push(Model::Struct(info));
        if info.is_standalone() && schema.abstract_class(&info.root_name).is_none() {
            continue;
        }

        match unions.iter_mut().find(|u| u.name == info.root_name) {
            Some(union) => union.variants.push(info),
            None => unions.push(UnionType {
                name: info.root_name.clone(),
                description: schema
                    .abstract_class(&info.root_name)
                    .map(|c| c.description.clone())
                    .unwrap_or_default(),
                variants: vec![info],
            }),
        }
    }

    for union in &unions {
        if let Some(clash) = union.variants.iter().find(|v| v.is_standalone()) {
            return Err(Error::Compose(format!(
                "'{}' is declared both as a standalone type and as a union of constructors",
                clash.name
            )));
        }
    }

    for class in &schema.abstract_classes {
        if !unions.iter().any(|u| u.name == class.name) {
            tracing::debug!(class = %class.name, "skipping union type without constructors");
        }
    }

    models.extend(unions.into_iter().map(Model::Enum));
    Ok(models)
}

/// Composes a struct for a constructor or a function request
pub struct StructComposer<'a> {
    info: &'a ClassInfo,
    mapper: &'a TypeMapper,
    generate_docs: bool,
}

impl<'a> StructComposer<'a> {
    pub fn new(info: &'a ClassInfo, mapper: &'a TypeMapper, generate_docs: bool) -> Self {
        Self {
            info,
            mapper,
            generate_docs,
        }
    }

    fn compose_init(&self, fields: &[(String, String)]) -> Source {
        if fields.is_empty() {
            return Source::new().line("public init() {}");
        }

        let params: Vec<String> = fields
            .iter()
            .map(|(name, ty)| format!("{name}: {ty}"))
            .collect();
        let assignments: Source = fields
            .iter()
            .map(|(name, _)| format!("self.{name} = {name}"))
            .collect();

        let signature = if params.len() > 1 {
            let last = params.len() - 1;
            let list: Source = params
                .iter()
                .enumerate()
                .map(|(i, p)| if i < last { format!("{p},") } else { p.clone() })
                .collect();
            Source::new()
                .line("public init(")
                .append(list.indent())
                .line(") {")
        } else {
            Source::new().line(format!("public init({}) {{", params[0]))
        };

        signature.append(assignments.indent()).line("}")
    }
}

impl Composer for StructComposer<'_> {
    fn compose(&self) -> Result<Source> {
        let type_name = self.info.type_name();

        let mut fields = Vec::with_capacity(self.info.properties.len());
        let mut declarations = Source::new();
        for property in &self.info.properties {
            let name = sanitize_identifier(&property.name);
            if fields.iter().any(|(existing, _)| *existing == name) {
                return Err(Error::Compose(format!(
                    "fields of '{}' collide as '{name}'",
                    self.info.name
                )));
            }
            let ty = self
                .mapper
                .swift_type(&property.type_name, property.optional, &self.info.name)?;

            if self.generate_docs {
                if let Some(description) = &property.description {
                    declarations = declarations.append(doc_comment(description));
                }
            }
            declarations = declarations
                .line(format!("public let {name}: {ty}"))
                .blank();
            fields.push((name, ty));
        }
        if !fields.is_empty() {
            declarations = declarations.blank();
        }

        let mut source = Source::new();
        if self.generate_docs {
            source = source.append(doc_comment(&self.info.description));
        }
        source = source
            .line(format!("public struct {type_name}: {CONFORMANCES} {{"))
            .blank()
            .append(declarations.append(self.compose_init(&fields)).indent())
            .line("}");

        // The TDLib error object is thrown by the generated API
        if type_name == "Error" && !self.info.is_function {
            source = source.blank().line("extension Error: Swift.Error {}");
        }

        Ok(source)
    }
}

/// Composes an `@type`-discriminated enum for a union type
pub struct EnumComposer<'a> {
    union: &'a UnionType<'a>,
    generate_docs: bool,
}

impl<'a> EnumComposer<'a> {
    pub fn new(union: &'a UnionType<'a>, generate_docs: bool) -> Self {
        Self {
            union,
            generate_docs,
        }
    }

    fn compose_decoder(&self) -> Source {
        let cases: Source = self
            .union
            .variants
            .iter()
            .fold(Source::new(), |source, variant| {
                let case = mask_keyword(&variant.name);
                source
                    .line(format!("case .{case}:"))
                    .indented_line(format!(
                        "let value = try {}(from: decoder)",
                        variant.type_name()
                    ))
                    .indented_line(format!("self = .{case}(value)"))
            });

        Source::new()
            .line("public init(from decoder: Decoder) throws {")
            .append(
                Source::new()
                    .line("let container = try decoder.container(keyedBy: DtoCodingKeys.self)")
                    .line("let type = try container.decode(Kind.self, forKey: .type)")
                    .line("switch type {")
                    .append(cases)
                    .line("}")
                    .indent(),
            )
            .line("}")
    }

    fn compose_encoder(&self) -> Source {
        let cases: Source = self
            .union
            .variants
            .iter()
            .fold(Source::new(), |source, variant| {
                let case = mask_keyword(&variant.name);
                source
                    .line(format!("case .{case}(let value):"))
                    .indented_line(format!(
                        "try container.encode(Kind.{case}, forKey: .type)"
                    ))
                    .indented_line("try value.encode(to: encoder)")
            });

        Source::new()
            .line("public func encode(to encoder: Encoder) throws {")
            .append(
                Source::new()
                    .line("var container = encoder.container(keyedBy: DtoCodingKeys.self)")
                    .line("switch self {")
                    .append(cases)
                    .line("}")
                    .indent(),
            )
            .line("}")
    }
}

impl Composer for EnumComposer<'_> {
    fn compose(&self) -> Result<Source> {
        let mut cases = Source::new();
        let mut kinds = Source::new();
        for variant in &self.union.variants {
            let case = mask_keyword(&variant.name);
            if self.generate_docs {
                cases = cases.append(doc_comment(&variant.description));
            }
            cases = cases
                .line(format!("case {case}({})", variant.type_name()))
                .blank();
            kinds = kinds.line(format!("case {case}"));
        }

        let body = cases
            .blank()
            .line("private enum Kind: String, Codable {")
            .append(kinds.indent())
            .line("}")
            .blank()
            .append(self.compose_decoder())
            .blank()
            .append(self.compose_encoder());

        let mut source = Source::new();
        if self.generate_docs {
            source = source.append(doc_comment(&self.union.description));
        }
        Ok(source
            .line(format!(
                "public indirect enum {}: {CONFORMANCES} {{",
                self.union.name
            ))
            .blank()
            .append(body.indent())
            .line("}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const SCHEMA: &str = "\
//@description An object of this type can be returned on every function call, in case of an error
//@code Error code
//@message Error message
error code:int32 message:string = Error;

ok = Ok;

//@class AuthenticationCodeType @description Provides information about the method by which an authentication code is delivered to the user

//@description Delivered via a private Telegram message @length Length of the code
authenticationCodeTypeTelegramMessage length:int32 = AuthenticationCodeType;

//@description Delivered via an SMS message @length Length of the code
authenticationCodeTypeSms length:int32 = AuthenticationCodeType;

//@description A default value @protocol Protocol name; may be null
defaultValue protocol:string = Value;
";

    #[test]
    fn test_collect_models() {
        let schema = parse(SCHEMA).unwrap();
        let names: Vec<String> = collect_models(&schema)
            .unwrap()
            .iter()
            .map(Model::name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Error",
                "Ok",
                "AuthenticationCodeTypeTelegramMessage",
                "AuthenticationCodeTypeSms",
                "DefaultValue",
                "AuthenticationCodeType",
                "Value"
            ]
        );
    }

    #[test]
    fn test_struct_with_fields() {
        let schema = parse(SCHEMA).unwrap();
        let mapper = TypeMapper::new(&schema);
        let code = StructComposer::new(&schema.classes[0], &mapper, true)
            .compose()
            .unwrap()
            .render();

        assert_eq!(
            code,
            "/// An object of this type can be returned on every function call, in case of an error\n\
             public struct Error: Codable, Equatable, Hashable {\n\
             \n\
             \x20   /// Error code\n\
             \x20   public let code: Int\n\
             \n\
             \x20   /// Error message\n\
             \x20   public let message: String\n\
             \n\
             \n\
             \x20   public init(\n\
             \x20       code: Int,\n\
             \x20       message: String\n\
             \x20   ) {\n\
             \x20       self.code = code\n\
             \x20       self.message = message\n\
             \x20   }\n\
             }\n\
             \n\
             extension Error: Swift.Error {}\n"
        );
    }

    #[test]
    fn test_empty_struct() {
        let schema = parse(SCHEMA).unwrap();
        let mapper = TypeMapper::new(&schema);
        let code = StructComposer::new(&schema.classes[1], &mapper, false)
            .compose()
            .unwrap()
            .render();

        assert_eq!(
            code,
            "public struct Ok: Codable, Equatable, Hashable {\n\n    public init() {}\n}\n"
        );
    }

    #[test]
    fn test_keyword_field_and_single_parameter_init() {
        let schema = parse(SCHEMA).unwrap();
        let mapper = TypeMapper::new(&schema);
        let code = StructComposer::new(&schema.classes[4], &mapper, true)
            .compose()
            .unwrap()
            .render();

        assert!(code.contains("    public let `protocol`: String?\n"));
        assert!(code.contains("    public init(`protocol`: String?) {\n"));
        assert!(code.contains("        self.`protocol` = `protocol`\n"));
    }

    #[test]
    fn test_union_enum() {
        let schema = parse(SCHEMA).unwrap();
        let models = collect_models(&schema).unwrap();
        let Some(Model::Enum(union)) = models.iter().find(|m| m.name() == "AuthenticationCodeType")
        else {
            panic!("missing union type");
        };
        let code = EnumComposer::new(union, true).compose().unwrap().render();

        assert!(code.starts_with(
            "/// Provides information about the method by which an authentication code is delivered to the user\n\
             public indirect enum AuthenticationCodeType: Codable, Equatable, Hashable {\n"
        ));
        assert!(code.contains(
            "    case authenticationCodeTypeTelegramMessage(AuthenticationCodeTypeTelegramMessage)\n"
        ));
        assert!(code.contains(
            "    private enum Kind: String, Codable {\n\
             \x20       case authenticationCodeTypeTelegramMessage\n\
             \x20       case authenticationCodeTypeSms\n\
             \x20   }\n"
        ));
        assert!(code.contains(
            "        case .authenticationCodeTypeSms:\n\
             \x20           let value = try AuthenticationCodeTypeSms(from: decoder)\n\
             \x20           self = .authenticationCodeTypeSms(value)\n"
        ));
        assert!(code.contains(
            "        case .authenticationCodeTypeSms(let value):\n\
             \x20           try container.encode(Kind.authenticationCodeTypeSms, forKey: .type)\n\
             \x20           try value.encode(to: encoder)\n"
        ));
    }

    #[test]
    fn test_colliding_field_names_fail() {
        let schema = parse("chat chat_id:int53 chatId:int53 = Chat;").unwrap();
        let mapper = TypeMapper::new(&schema);
        let err = StructComposer::new(&schema.classes[0], &mapper, true)
            .compose()
            .unwrap_err();
        assert!(matches!(err, Error::Compose(ref message) if message.contains("chatId")));
    }

    #[test]
    fn test_standalone_and_union_clash_fails() {
        let schema = parse("error code:int32 = Error;\nerrorOther = Error;").unwrap();
        assert!(matches!(collect_models(&schema), Err(Error::Compose(_))));
    }
}
