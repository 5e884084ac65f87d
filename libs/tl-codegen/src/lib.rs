//! TL to Swift Code Generator
//!
//! This library reads a TDLib-style TL schema (`td_api.tl`) and generates
//! Swift client sources: the API classes, the client protocols, one model
//! per type and one request struct per function.
//!
//! ## Architecture
//!
//! The generator uses a three-stage pipeline:
//! 1. **Parser**: Turns the schema text into classes with their properties and docs
//! 2. **IR (Intermediate Representation)**: Language-agnostic `Schema`
//! 3. **Generators**: Composers that turn the IR into indented `Source` fragments
//!
//! Composition happens fully in memory, so a failing schema never leaves
//! partial output behind.

pub mod error;
pub mod generators;
pub mod ir;
pub mod parser;
pub mod source;
pub mod utils;

pub use error::{Error, Result};

use std::fs;
use std::path::Path;

use generators::swift::SwiftGenerator;
use generators::GeneratorConfig;
use ir::Schema;

/// File the intermediate representation is written to by [`write_schema_ir`]
pub const SCHEMA_IR_FILE: &str = "schema.json";

/// Main entry point for code generation
pub struct CodeGenerator {
    schema: Schema,
}

impl CodeGenerator {
    /// Create a new code generator from TL schema text
    pub fn from_schema_text(text: &str) -> Result<Self> {
        let schema = parser::parse(text)?;
        Ok(Self { schema })
    }

    /// Create a new code generator from an already parsed schema
    pub fn from_schema(schema: Schema) -> Self {
        Self { schema }
    }

    /// Get the parsed schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Generate code for a specific language
    pub fn generate<G: generators::Generator>(&self, generator: G) -> Result<G::Output> {
        generator.generate(&self.schema)
    }
}

/// Summary of a [`generate_swift_from_file`] run
#[derive(Debug)]
pub struct GenerationReport {
    /// Number of files written
    pub files: usize,
    /// The parsed schema the files were generated from
    pub schema: Schema,
}

/// Convenience helper to run the Swift generator on a schema file.
///
/// Nothing is written unless parsing and composition both succeed.
pub fn generate_swift_from_file(
    schema_path: &Path,
    output_dir: &Path,
    config: GeneratorConfig,
) -> Result<GenerationReport> {
    let text = fs::read_to_string(schema_path).map_err(|e| Error::io(schema_path, e))?;
    let codegen = CodeGenerator::from_schema_text(&text)?;

    let output = codegen.generate(SwiftGenerator::new(config))?;
    utils::write_modules(output_dir, &output.files)?;

    Ok(GenerationReport {
        files: output.files.len(),
        schema: codegen.schema,
    })
}

/// Write the schema as pretty-printed JSON into `output_dir`
pub fn write_schema_ir(schema: &Schema, output_dir: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(schema)?;
    let path = output_dir.join(SCHEMA_IR_FILE);
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    fs::write(&path, json).map_err(|e| Error::io(&path, e))?;
    tracing::debug!(path = %path.display(), "wrote schema IR");
    Ok(())
}
