//! Runtime support files referenced by the generated API and models

use crate::error::Result;
use crate::generators::Composer;
use crate::source::Source;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportFile {
    /// `DTO` envelope, `DtoCodingKeys` and `JSONDecoder.tryDecode`
    Dto,
    /// `TdInt64`, a 64-bit integer sent as a JSON string
    TdInt64,
}

impl SupportFile {
    pub const ALL: [SupportFile; 2] = [SupportFile::Dto, SupportFile::TdInt64];

    pub fn file_name(self) -> &'static str {
        match self {
            SupportFile::Dto => "DTO.swift",
            SupportFile::TdInt64 => "TdInt64.swift",
        }
    }
}

pub struct SupportComposer {
    file: SupportFile,
}

impl SupportComposer {
    pub fn new(file: SupportFile) -> Self {
        Self { file }
    }
}

impl Composer for SupportComposer {
    fn compose(&self) -> Result<Source> {
        Ok(match self.file {
            SupportFile::Dto => dto(),
            SupportFile::TdInt64 => td_int64(),
        })
    }
}

fn dto() -> Source {
    let coding_keys = Source::new()
        .line("public enum DtoCodingKeys: String, CodingKey {")
        .indented_line("case type = \"@type\"")
        .indented_line("case extra = \"@extra\"")
        .line("}");

    let members = Source::new()
        .line("public let payload: T")
        .line("public let type: String")
        .line("public let extra: String?")
        .blank()
        .line("private let encoder: JSONEncoder?")
        .blank()
        .blank()
        .line("public init(_ payload: T, encoder: JSONEncoder) {")
        .indented_line("let name = String(describing: T.self)")
        .indented_line("let type = name.prefix(1).lowercased() + name.dropFirst()")
        .indented_line("self.init(payload, type: type, extra: nil, encoder: encoder)")
        .line("}")
        .blank()
        .line("private init(_ payload: T, type: String, extra: String?, encoder: JSONEncoder?) {")
        .indented_line("self.payload = payload")
        .indented_line("self.type = type")
        .indented_line("self.extra = extra")
        .indented_line("self.encoder = encoder")
        .line("}")
        .blank()
        .line("public init(from decoder: Decoder) throws {")
        .indented_line("let container = try decoder.container(keyedBy: DtoCodingKeys.self)")
        .indented_line("self.type = try container.decode(String.self, forKey: .type)")
        .indented_line("self.extra = try container.decodeIfPresent(String.self, forKey: .extra)")
        .indented_line("self.payload = try T(from: decoder)")
        .indented_line("self.encoder = nil")
        .line("}")
        .blank()
        .line("public func encode(to encoder: Encoder) throws {")
        .indented_line("var container = encoder.container(keyedBy: DtoCodingKeys.self)")
        .indented_line("try container.encode(type, forKey: .type)")
        .indented_line("try container.encodeIfPresent(extra, forKey: .extra)")
        .indented_line("try payload.encode(to: encoder)")
        .line("}")
        .blank()
        .line("public func make(with extra: String?) throws -> Data {")
        .indented_line("let dto = DTO(payload, type: type, extra: extra, encoder: encoder)")
        .indented_line("return try (encoder ?? JSONEncoder()).encode(dto)")
        .line("}");

    let try_decode = Source::new()
        .line("extension JSONDecoder {")
        .blank()
        .append(
            Source::new()
                .line("/// Decodes a value, returning the failure instead of throwing it")
                .line("public func tryDecode<T: Decodable>(_ type: T.Type, from data: Data) -> Result<T, Swift.Error> {")
                .append(
                    Source::new()
                        .line("do {")
                        .indented_line("return .success(try decode(type, from: data))")
                        .line("} catch {")
                        .indented_line("return .failure(error)")
                        .line("}")
                        .indent(),
                )
                .line("}")
                .indent(),
        )
        .line("}");

    Source::new()
        .append(coding_keys)
        .blank()
        .blank()
        .line("/// Envelope adding the `@type` and `@extra` fields TDLib expects around every object")
        .line("public struct DTO<T: Codable>: Codable, TdQuery {")
        .blank()
        .append(members.indent())
        .line("}")
        .blank()
        .blank()
        .append(try_decode)
}

fn td_int64() -> Source {
    let members = Source::new()
        .line("public let rawValue: Int64")
        .blank()
        .blank()
        .line("public init(_ rawValue: Int64) {")
        .indented_line("self.rawValue = rawValue")
        .line("}")
        .blank()
        .line("public init(integerLiteral value: Int64) {")
        .indented_line("self.rawValue = value")
        .line("}")
        .blank()
        .line("public var description: String {")
        .indented_line("String(rawValue)")
        .line("}")
        .blank()
        .line("public init(from decoder: Decoder) throws {")
        .append(
            Source::new()
                .line("let container = try decoder.singleValueContainer()")
                .line("if let string = try? container.decode(String.self), let value = Int64(string) {")
                .indented_line("self.rawValue = value")
                .line("} else {")
                .indented_line("self.rawValue = try container.decode(Int64.self)")
                .line("}")
                .indent(),
        )
        .line("}")
        .blank()
        .line("public func encode(to encoder: Encoder) throws {")
        .indented_line("var container = encoder.singleValueContainer()")
        .indented_line("try container.encode(String(rawValue))")
        .line("}");

    Source::new()
        .line("/// 64-bit integer that TDLib transports as a JSON string")
        .line("public struct TdInt64: Codable, Equatable, Hashable, ExpressibleByIntegerLiteral, CustomStringConvertible {")
        .blank()
        .append(members.indent())
        .line("}")
}
