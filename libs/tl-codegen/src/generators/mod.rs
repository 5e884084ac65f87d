//! Code generators for different target languages
//!
//! Each language has its own module that implements the `Generator` trait.
//! A generator is made of composers, each rendering one artifact.

pub mod swift;

use crate::error::Result;
use crate::ir::Schema;
use crate::source::Source;

/// Trait that all language generators must implement
pub trait Generator {
    /// The output type of this generator
    type Output;

    /// Generate code from the parsed schema
    fn generate(&self, schema: &Schema) -> Result<Self::Output>;
}

/// Renders one generated artifact
pub trait Composer {
    fn compose(&self) -> Result<Source>;
}

/// How generated API methods deliver their result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallingConvention {
    /// Trailing completion closure receiving a `Result`
    Callback,
    /// `async throws` method returning the result directly
    DirectReturn,
}

/// Configuration options for code generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Whether to generate documentation comments
    pub generate_docs: bool,
    /// Whether to generate the callback-style API class
    pub callback_api: bool,
    /// Whether to generate the async/await API class
    pub async_api: bool,
}

impl GeneratorConfig {
    /// Calling conventions enabled by this configuration, in output order
    pub fn conventions(&self) -> Vec<CallingConvention> {
        let mut conventions = Vec::with_capacity(2);
        if self.callback_api {
            conventions.push(CallingConvention::Callback);
        }
        if self.async_api {
            conventions.push(CallingConvention::DirectReturn);
        }
        conventions
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generate_docs: true,
            callback_api: true,
            async_api: true,
        }
    }
}
