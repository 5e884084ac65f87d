//! API class generation (`TdApi` / `AsyncTdApi`)
//!
//! Every function declaration becomes one wrapper method that builds the
//! request struct and hands it to the private `execute` dispatch primitive.
//! Both calling conventions share the parameter list and the request
//! construction; only the signature tail and the body tail differ.

use super::types::{mask_keyword, sanitize_identifier, TypeMapper};
use super::doc_comment;
use crate::error::{Error, Result};
use crate::generators::{CallingConvention, Composer};
use crate::ir::{ClassInfo, Schema};
use crate::source::Source;
use std::collections::BTreeSet;

/// Composes the API class for one calling convention
pub struct MethodsComposer<'a> {
    functions: Vec<&'a ClassInfo>,
    mapper: &'a TypeMapper,
    convention: CallingConvention,
    generate_docs: bool,
}

impl<'a> MethodsComposer<'a> {
    pub fn new(
        schema: &'a Schema,
        mapper: &'a TypeMapper,
        convention: CallingConvention,
        generate_docs: bool,
    ) -> Self {
        Self {
            functions: schema.functions().collect(),
            mapper,
            convention,
            generate_docs,
        }
    }

    /// Name of the generated class
    pub fn class_name(&self) -> &'static str {
        match self.convention {
            CallingConvention::Callback => "TdApi",
            CallingConvention::DirectReturn => "AsyncTdApi",
        }
    }

    fn client_protocol(&self) -> &'static str {
        match self.convention {
            CallingConvention::Callback => "TdClient",
            CallingConvention::DirectReturn => "AsyncTdClient",
        }
    }

    fn compose_method(&self, info: &ClassInfo) -> Result<Source> {
        if info.name.is_empty() {
            return Err(Error::Compose(
                "function declaration with an empty name".to_string(),
            ));
        }

        let result_type = self.mapper.result_type(&info.root_name, &info.name)?;
        let mut params = self.parameter_list(info)?;

        let signature_tail = match self.convention {
            CallingConvention::Callback => {
                params.push(format!(
                    "completion: @escaping (Result<{result_type}, Swift.Error>) -> Void"
                ));
                " {".to_string()
            }
            CallingConvention::DirectReturn => format!(" async throws -> {result_type} {{"),
        };

        let name = mask_keyword(&info.name);
        let signature = if params.len() > 1 {
            Source::new()
                .line(format!("public func {name}("))
                .append(comma_separated(&params).indent())
                .line(format!("){signature_tail}"))
        } else {
            let single = params.first().map(String::as_str).unwrap_or_default();
            Source::new().line(format!("public func {name}({single}){signature_tail}"))
        };

        let body = self.compose_request(info).line(self.dispatch_line());

        let mut method = Source::new();
        if self.generate_docs {
            method = method.append(self.compose_comment(info));
        }
        Ok(method
            .append(signature)
            .append(body.indent())
            .line("}")
            .blank())
    }

    /// `name: Type` for every property, in declaration order
    fn parameter_list(&self, info: &ClassInfo) -> Result<Vec<String>> {
        let mut seen = BTreeSet::new();
        info.properties
            .iter()
            .map(|param| {
                let ident = sanitize_identifier(&param.name);
                if !seen.insert(ident.clone()) {
                    return Err(Error::Compose(format!(
                        "parameters of '{}' collide as '{ident}'",
                        info.name
                    )));
                }
                let ty = self
                    .mapper
                    .swift_type(&param.type_name, param.optional, &info.name)?;
                Ok(format!("{ident}: {ty}"))
            })
            .collect()
    }

    fn compose_comment(&self, info: &ClassInfo) -> Source {
        let mut comment = doc_comment(&info.description);
        for param in &info.properties {
            let description = param.description.as_deref().unwrap_or_default();
            comment = comment.line(format!(
                "/// - Parameter {}: {description}",
                sanitize_identifier(&param.name)
            ));
        }
        if self.convention == CallingConvention::DirectReturn {
            comment = comment.line(format!("/// - Returns: {}", info.root_name));
        }
        comment
    }

    /// `let query = GetChat(chatId: chatId)`
    fn compose_request(&self, info: &ClassInfo) -> Source {
        let struct_name = info.type_name();
        if info.properties.is_empty() {
            return Source::new().line(format!("let query = {struct_name}()"));
        }

        let arguments: Vec<String> = info
            .properties
            .iter()
            .map(|param| {
                let ident = sanitize_identifier(&param.name);
                format!("{ident}: {ident}")
            })
            .collect();

        Source::new()
            .line(format!("let query = {struct_name}("))
            .append(comma_separated(&arguments).indent())
            .line(")")
    }

    fn dispatch_line(&self) -> &'static str {
        match self.convention {
            CallingConvention::Callback => "self.execute(query: query, completion: completion)",
            CallingConvention::DirectReturn => "return try await self.execute(query: query)",
        }
    }

    /// The private dispatch primitive every method goes through
    fn compose_execute(&self) -> Source {
        match self.convention {
            CallingConvention::Callback => Source::new()
                .line("private func execute<Q, R>(")
                .indented_line("query: Q,")
                .indented_line("completion: @escaping (Result<R, Swift.Error>) -> Void")
                .line(") where Q: Codable, R: Codable {")
                .append(
                    Source::new()
                        .line("let dto = DTO(query, encoder: self.encoder)")
                        .line("client.send(query: dto) { [weak self] result in")
                        .append(
                            Source::new()
                                .line("guard let self = self else { return }")
                                .line("if let error = try? self.decoder.decode(DTO<Error>.self, from: result) {")
                                .indented_line("completion(.failure(error.payload))")
                                .line("} else {")
                                .indented_line("let response = self.decoder.tryDecode(DTO<R>.self, from: result)")
                                .indented_line("completion(response.map { $0.payload })")
                                .line("}")
                                .indent(),
                        )
                        .line("}")
                        .indent(),
                )
                .line("}"),
            CallingConvention::DirectReturn => Source::new()
                .line("private func execute<Q, R>(query: Q) async throws -> R where Q: Codable, R: Codable {")
                .append(
                    Source::new()
                        .line("let dto = DTO(query, encoder: self.encoder)")
                        .line("let result = try await client.send(query: dto)")
                        .blank()
                        .line("if let error = try? self.decoder.decode(DTO<Error>.self, from: result) {")
                        .indented_line("throw error.payload")
                        .line("}")
                        .line("let response = self.decoder.tryDecode(DTO<R>.self, from: result)")
                        .line("switch response {")
                        .line("case .success(let data):")
                        .indented_line("return data.payload")
                        .line("case .failure(let error):")
                        .indented_line("throw error")
                        .line("}")
                        .indent(),
                )
                .line("}"),
        }
    }
}

impl Composer for MethodsComposer<'_> {
    fn compose(&self) -> Result<Source> {
        let mut methods = Source::new();
        for info in &self.functions {
            methods = methods.append(self.compose_method(info)?);
        }

        let client = self.client_protocol();
        let members = Source::new()
            .line(format!("public let client: {client}"))
            .line("public let encoder = JSONEncoder()")
            .line("public let decoder = JSONDecoder()")
            .blank()
            .line(format!("public init(client: {client}) {{"))
            .indented_line("self.client = client")
            .indented_line("self.encoder.keyEncodingStrategy = .convertToSnakeCase")
            .indented_line("self.decoder.keyDecodingStrategy = .convertFromSnakeCase")
            .line("}")
            .blank()
            .blank()
            .append(methods)
            .blank()
            .append(self.compose_execute());

        Ok(Source::new()
            .line(format!("public final class {} {{", self.class_name()))
            .blank()
            .append(members.indent())
            .line("}"))
    }
}

/// One item per line, every item but the last followed by a comma
fn comma_separated(items: &[String]) -> Source {
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .map(|(i, item)| if i < last { format!("{item},") } else { item.clone() })
        .collect()
}
