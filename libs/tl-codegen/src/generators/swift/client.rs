//! Transport protocol generation (`TdClient`, `AsyncTdClient`, `TdQuery`)
//!
//! The client contract does not depend on the schema.

use crate::error::Result;
use crate::generators::Composer;
use crate::source::Source;

pub struct ClientProtocolComposer;

impl ClientProtocolComposer {
    fn callback_protocol() -> Source {
        Source::new()
            .line("/// Basic protocol for communicate with TdLib.")
            .line("public protocol TdClient {")
            .blank()
            .append(
                Source::new()
                    .line("/// Receives incoming updates and request responses from the TDLib client")
                    .line("func run(updateHandler: @escaping (Data) -> Void)")
                    .blank()
                    .line("/// Sends request to the TDLib client.")
                    .line("func send(query: TdQuery, completion: ((Data) -> Void)?)")
                    .blank()
                    .line("/// Synchronously executes TDLib request. Only a few requests can be executed synchronously.")
                    .line("func execute(query: TdQuery) -> Result<[String: Any]?, Swift.Error>")
                    .blank()
                    .line("/// Close connection with TDLib.")
                    .line("func close()")
                    .indent(),
            )
            .blank()
            .line("}")
    }

    fn async_protocol() -> Source {
        Source::new()
            .line("/// Basic Async protocol for communicate with TdLib.")
            .line("@available(iOS 15.0, macOS 12.0, watchOS 8.0, tvOS 15.0, *)")
            .line("public protocol AsyncTdClient {")
            .blank()
            .append(
                Source::new()
                    .line("/// Creates client, starts updates poller and asynchronously processes updates via the handler")
                    .line("func run(updateHandler: @escaping (Data) -> Void)")
                    .blank()
                    .line("/// Asynchronously sends request to the TDLib client.")
                    .line("func send(query: TdQuery) async throws -> Data")
                    .blank()
                    .line("/// Synchronously executes TDLib request.")
                    .line("func execute(query: TdQuery) throws -> [String: Any]?")
                    .blank()
                    .line("/// Close connection with TDLib and stop updates polling.")
                    .line("func close()")
                    .indent(),
            )
            .blank()
            .line("}")
    }

    fn query_protocol() -> Source {
        Source::new()
            .line("public protocol TdQuery {")
            .blank()
            .indented_line("func make(with extra: String?) throws -> Data")
            .blank()
            .line("}")
    }
}

impl Composer for ClientProtocolComposer {
    fn compose(&self) -> Result<Source> {
        Ok(Source::new()
            .append(Self::callback_protocol())
            .blank()
            .blank()
            .append(Self::async_protocol())
            .blank()
            .blank()
            .append(Self::query_protocol()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_contract() {
        let code = ClientProtocolComposer.compose().unwrap().render();

        assert!(code.starts_with("/// Basic protocol for communicate with TdLib.\npublic protocol TdClient {\n"));
        assert!(code.contains("    func send(query: TdQuery, completion: ((Data) -> Void)?)\n"));
        assert!(code.contains("    func send(query: TdQuery) async throws -> Data\n"));
        assert!(code.contains("    func execute(query: TdQuery) throws -> [String: Any]?\n"));
        assert!(code.contains("public protocol TdQuery {\n\n    func make(with extra: String?) throws -> Data\n\n}\n"));
        assert_eq!(code.matches("func close()").count(), 2);
        assert_eq!(code.matches("func run(updateHandler:").count(), 2);
    }
}
