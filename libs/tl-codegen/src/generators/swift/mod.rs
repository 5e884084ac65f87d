//! Swift code generator for TL schemas

mod client;
mod methods;
mod models;
mod support;
pub mod types;

pub use client::ClientProtocolComposer;
pub use methods::MethodsComposer;
pub use models::{collect_models, EnumComposer, Model, StructComposer, UnionType};
pub use support::{SupportComposer, SupportFile};

use crate::error::{Error, Result};
use crate::generators::{Composer, Generator, GeneratorConfig};
use crate::ir::Schema;
use crate::source::Source;
use std::collections::{BTreeMap, BTreeSet};
use types::TypeMapper;

/// Directory for data types (constructors and unions)
pub const MODELS_DIR: &str = "Models";
/// Directory for request structs of functions
pub const FUNCTIONS_DIR: &str = "Functions";
/// Directory for runtime support files
pub const UTILS_DIR: &str = "Utils";

/// Output of the Swift generator
#[derive(Debug)]
pub struct SwiftOutput {
    /// Generated files indexed by path relative to the output directory
    pub files: BTreeMap<String, String>,
}

/// Swift code generator
pub struct SwiftGenerator {
    config: GeneratorConfig,
}

impl SwiftGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn new_default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Generator for SwiftGenerator {
    type Output = SwiftOutput;

    fn generate(&self, schema: &Schema) -> Result<Self::Output> {
        let mapper = TypeMapper::new(schema);
        let docs = self.config.generate_docs;
        let mut out = OutputFiles::default();

        // API classes, one per enabled calling convention
        for convention in self.config.conventions() {
            let composer = MethodsComposer::new(schema, &mapper, convention, docs);
            out.emit(None, composer.class_name(), &composer)?;
        }

        out.emit(None, "TdClient", &ClientProtocolComposer)?;

        for model in collect_models(schema)? {
            let name = model.name();
            match &model {
                Model::Struct(info) => {
                    out.emit(Some(MODELS_DIR), &name, &StructComposer::new(info, &mapper, docs))?
                }
                Model::Enum(union) => {
                    out.emit(Some(MODELS_DIR), &name, &EnumComposer::new(union, docs))?
                }
            }
        }

        for info in schema.functions() {
            let composer = StructComposer::new(info, &mapper, docs);
            out.emit(Some(FUNCTIONS_DIR), &info.type_name(), &composer)?;
        }

        for file in SupportFile::ALL {
            let name = file.file_name().trim_end_matches(".swift");
            out.emit(Some(UTILS_DIR), name, &SupportComposer::new(file))?;
        }

        tracing::info!(files = out.files.len(), "generated Swift sources");
        Ok(SwiftOutput { files: out.files })
    }
}

/// Accumulates rendered files, rejecting two artifacts for one Swift type
#[derive(Default)]
struct OutputFiles {
    files: BTreeMap<String, String>,
    type_names: BTreeSet<String>,
}

impl OutputFiles {
    fn emit(&mut self, dir: Option<&str>, name: &str, composer: &dyn Composer) -> Result<()> {
        if !self.type_names.insert(name.to_string()) {
            return Err(Error::Compose(format!(
                "more than one generated artifact is named '{name}'"
            )));
        }

        let file_name = format!("{name}.swift");
        let path = match dir {
            Some(dir) => format!("{dir}/{file_name}"),
            None => file_name.clone(),
        };

        let contents = file_header(&file_name).append(composer.compose()?).render();
        tracing::debug!(path = %path, bytes = contents.len(), "composed file");
        self.files.insert(path, contents);
        Ok(())
    }
}

fn file_header(file_name: &str) -> Source {
    Source::new()
        .line("//")
        .line(format!("//  {file_name}"))
        .line("//  tl2swift")
        .line("//")
        .line("//  Generated automatically. Any changes will be lost!")
        .line("//")
        .blank()
        .line("import Foundation")
        .blank()
        .blank()
}

/// `/// text` for every non-empty line of `text`
pub(crate) fn doc_comment(text: &str) -> Source {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("/// {line}"))
        .collect()
}
