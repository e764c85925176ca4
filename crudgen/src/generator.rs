//! CRUD file generation
//!
//! Turns a completed [`GenerationRequest`] into the three rendered files
//! (API, controller, model) plus the build summary. Nothing is written here;
//! see [`crate::emitter`] for that.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::naming::NamingHelpers;
use crate::registry::Module;
use crate::schema::{SchemaMapping, TableSchema};
use crate::templates::{TemplateId, TemplateRenderer};

/// Version stamped into generated files
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything needed to generate one CRUD, fixed for the rest of the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Target module id (e.g., `cmsadmin`)
    pub module_name: String,
    /// Model name (e.g., `NavItem`)
    pub model_name: String,
    /// API endpoint (e.g., `api-cms-navitem`)
    pub api_endpoint: String,
    /// Database table backing the model
    pub db_table_name: String,
    /// Declare the string fields as i18n attributes
    pub enable_i18n: bool,
}

impl GenerationRequest {
    /// Camelized model name used for class and file names
    #[must_use]
    pub fn class_name(&self) -> String {
        NamingHelpers::camelize(&self.model_name)
    }
}

/// Kind of generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `apis/<Model>Controller.php`
    Api,
    /// `controllers/<Model>Controller.php`
    Controller,
    /// `models/<Model>.php`
    Model,
}

impl FileKind {
    /// Module subdirectory holding files of this kind
    #[must_use]
    pub const fn directory(self) -> &'static str {
        match self {
            Self::Api => "apis",
            Self::Controller => "controllers",
            Self::Model => "models",
        }
    }
}

/// A rendered file waiting to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    /// What the file contains
    pub kind: FileKind,
    /// Directory the file is written into
    pub directory: PathBuf,
    /// File name inside `directory`
    pub file_name: String,
    /// Rendered content
    pub content: String,
}

impl EmittedFile {
    /// Full path of the file
    #[must_use]
    pub fn target(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Output of one generation run
#[derive(Debug, Clone)]
pub struct GeneratedCrud {
    /// Files in write order: API, controller, model
    pub files: Vec<EmittedFile>,
    /// Rendered build summary
    pub summary: String,
}

#[derive(Serialize)]
struct ClassContext<'a> {
    namespace: String,
    class_name: String,
    model_class: &'a str,
    generator_version: &'static str,
}

#[derive(Serialize)]
struct ModelContext<'a> {
    namespace: String,
    class_name: &'a str,
    generator_version: &'static str,
    api_endpoint: &'a str,
    db_table_name: &'a str,
    i18n: bool,
    #[serde(flatten)]
    mapping: SchemaMapping,
}

#[derive(Serialize)]
struct SummaryContext<'a> {
    api_endpoint: &'a str,
    api_class_path: String,
    model_title: String,
    controller_route: String,
}

/// Renders CRUD files for a module
pub struct CrudGenerator {
    renderer: TemplateRenderer,
}

impl CrudGenerator {
    /// Create a generator with the built-in templates
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        Ok(Self {
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Render every file of the CRUD for `request`
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    #[tracing::instrument(skip_all, fields(module = %module.id, model = %request.model_name))]
    pub fn generate(
        &self,
        module: &Module,
        request: &GenerationRequest,
        table: &TableSchema,
    ) -> Result<GeneratedCrud> {
        let class_name = request.class_name();
        let controller_class = format!("{class_name}Controller");
        let models_ns = NamingHelpers::sub_namespace(&module.namespace, FileKind::Model.directory());
        let model_class = NamingHelpers::sub_namespace(&models_ns, &class_name);
        let base = Path::new(&module.base_path);

        let mut files = Vec::with_capacity(3);

        for (kind, id) in [
            (FileKind::Api, TemplateId::Api),
            (FileKind::Controller, TemplateId::Controller),
        ] {
            let content = self.renderer.render(
                id,
                ClassContext {
                    namespace: NamingHelpers::sub_namespace(&module.namespace, kind.directory()),
                    class_name: controller_class.clone(),
                    model_class: &model_class,
                    generator_version: GENERATOR_VERSION,
                },
            )?;
            files.push(EmittedFile {
                kind,
                directory: base.join(kind.directory()),
                file_name: format!("{controller_class}.php"),
                content,
            });
        }

        let mapping = SchemaMapping::from_schema(table);
        tracing::debug!(
            fields = mapping.fields.len(),
            text_fields = mapping.text_fields.len(),
            "mapped table schema"
        );

        let content = self.renderer.render(
            TemplateId::Model,
            ModelContext {
                namespace: models_ns,
                class_name: &class_name,
                generator_version: GENERATOR_VERSION,
                api_endpoint: &request.api_endpoint,
                db_table_name: &table.name,
                i18n: request.enable_i18n,
                mapping,
            },
        )?;
        files.push(EmittedFile {
            kind: FileKind::Model,
            directory: base.join(FileKind::Model.directory()),
            file_name: format!("{class_name}.php"),
            content,
        });

        let api_ns = NamingHelpers::sub_namespace(&module.namespace, FileKind::Api.directory());
        let summary = self.renderer.render(
            TemplateId::BuildSummary,
            SummaryContext {
                api_endpoint: &request.api_endpoint,
                api_class_path: NamingHelpers::sub_namespace(&api_ns, &controller_class),
                model_title: NamingHelpers::humanize(&class_name),
                controller_route: NamingHelpers::controller_route(&module.id, &class_name),
            },
        )?;

        Ok(GeneratedCrud { files, summary })
    }
}
