//! Handlebars-backed template renderer.
//!
//! Built-in templates are registered first; custom templates with the same
//! logical name replace them. The registry runs in strict mode, so a template
//! that references a missing context key fails instead of printing nothing.
//! Output is never HTML-escaped: the target is Go source, not markup.

use std::{collections::BTreeMap, path::Path};

use handlebars::Handlebars;
use tracing::{debug, instrument, warn};

use goclean_core::{
    application::{
        ApplicationError,
        ports::{TemplateOrigin, TemplateRenderer},
    },
    error::{GocleanError, GocleanResult},
};

use crate::{
    builtin_templates::BUILTIN_TEMPLATES,
    renderer::helpers,
    template_loader::{CustomTemplate, TemplateDirectory},
};

/// Template renderer using handlebars.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
    origins: BTreeMap<String, TemplateOrigin>,
    /// Custom templates that failed to compile, with the parse error.
    broken: BTreeMap<String, String>,
}

impl std::fmt::Debug for HandlebarsRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlebarsRenderer")
            .field("origins", &self.origins)
            .field("broken", &self.broken)
            .finish_non_exhaustive()
    }
}

impl HandlebarsRenderer {
    /// Renderer holding only the built-in set.
    pub fn new() -> GocleanResult<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        helpers::register(&mut registry);

        let mut origins = BTreeMap::new();
        for template in BUILTIN_TEMPLATES {
            registry
                .register_template_string(template.name, template.source)
                .map_err(|e| GocleanError::Internal {
                    message: format!("built-in template '{}' does not compile: {e}", template.name),
                })?;
            origins.insert(template.name.to_string(), TemplateOrigin::Builtin);
        }

        Ok(Self {
            registry,
            origins,
            broken: BTreeMap::new(),
        })
    }

    /// Built-ins overridden by whatever `dir` contains.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn with_custom_dir(dir: &Path) -> GocleanResult<Self> {
        let mut renderer = Self::new()?;
        for template in TemplateDirectory::new(dir).discover()? {
            renderer.register_custom(template);
        }
        Ok(renderer)
    }

    /// Replace a built-in with a user template.
    ///
    /// A template that does not compile is remembered rather than rejected,
    /// so only the artifacts that need it fail.
    pub fn register_custom(&mut self, template: CustomTemplate) {
        let origin = TemplateOrigin::Custom(template.path.clone());
        match self
            .registry
            .register_template_string(&template.name, &template.source)
        {
            Ok(()) => {
                debug!(name = %template.name, file = %template.path.display(), "custom template registered");
                self.broken.remove(&template.name);
            }
            Err(e) => {
                warn!(
                    name = %template.name,
                    file = %template.path.display(),
                    error = %e,
                    "custom template does not compile"
                );
                self.broken.insert(template.name.clone(), e.to_string());
            }
        }
        self.origins.insert(template.name, origin);
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, name: &str, context: &serde_json::Value) -> GocleanResult<String> {
        if let Some(reason) = self.broken.get(name) {
            return Err(ApplicationError::RenderingFailed {
                template: name.to_string(),
                reason: reason.clone(),
            }
            .into());
        }
        if !self.registry.has_template(name) {
            return Err(ApplicationError::TemplateNotFound {
                name: name.to_string(),
            }
            .into());
        }

        self.registry.render(name, context).map_err(|e| {
            ApplicationError::RenderingFailed {
                template: name.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn origin(&self, name: &str) -> Option<TemplateOrigin> {
        self.origins.get(name).cloned()
    }

    fn names(&self) -> Vec<String> {
        self.origins.keys().cloned().collect()
    }
}
