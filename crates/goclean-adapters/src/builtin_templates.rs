//! Built-in template set.
//!
//! The templates that ship with goclean are compiled into the binary with
//! `include_str!`, one per fixed-shape artifact. Their logical names are the
//! ones in [`goclean_core::domain::template_names`]; a custom template with the
//! same logical name overrides the built-in at render time.
//!
//! # Layout
//!
//! ```text
//! templates/
//! ├── domain/entity.tmpl
//! ├── domain/entity_test.tmpl
//! ├── dto/entity.tmpl
//! ├── repository/entity.tmpl
//! ├── usecase/entity.tmpl
//! └── handler/entity.tmpl
//! ```

use goclean_core::domain::template_names;

/// One embedded template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinTemplate {
    /// Logical name (relative path without extension).
    pub name: &'static str,
    pub source: &'static str,
}

impl BuiltinTemplate {
    /// Relative file path this template is materialized to.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, crate::template_loader::TEMPLATE_EXTENSION)
    }
}

pub static BUILTIN_TEMPLATES: &[BuiltinTemplate] = &[
    BuiltinTemplate {
        name: template_names::DOMAIN_ENTITY,
        source: include_str!("../templates/domain/entity.tmpl"),
    },
    BuiltinTemplate {
        name: template_names::DOMAIN_ENTITY_TEST,
        source: include_str!("../templates/domain/entity_test.tmpl"),
    },
    BuiltinTemplate {
        name: template_names::DTO_ENTITY,
        source: include_str!("../templates/dto/entity.tmpl"),
    },
    BuiltinTemplate {
        name: template_names::REPOSITORY_ENTITY,
        source: include_str!("../templates/repository/entity.tmpl"),
    },
    BuiltinTemplate {
        name: template_names::USECASE_ENTITY,
        source: include_str!("../templates/usecase/entity.tmpl"),
    },
    BuiltinTemplate {
        name: template_names::HANDLER_ENTITY,
        source: include_str!("../templates/handler/entity.tmpl"),
    },
];

/// Look up a built-in by logical name.
pub fn get(name: &str) -> Option<&'static BuiltinTemplate> {
    BUILTIN_TEMPLATES.iter().find(|t| t.name == name)
}

/// Whether `name` is one the generator will ever ask for.
pub fn is_known(name: &str) -> bool {
    get(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_logical_name_has_a_builtin() {
        for name in template_names::ALL {
            assert!(get(name).is_some(), "missing built-in for {name}");
        }
        assert_eq!(BUILTIN_TEMPLATES.len(), template_names::ALL.len());
    }

    #[test]
    fn builtins_start_with_a_package_clause() {
        for template in BUILTIN_TEMPLATES {
            assert!(
                template.source.starts_with("package "),
                "{} has no package clause",
                template.name
            );
        }
    }

    #[test]
    fn file_names_keep_the_directory() {
        let tpl = get(template_names::DOMAIN_ENTITY_TEST).unwrap();
        assert_eq!(tpl.file_name(), "domain/entity_test.tmpl");
        assert!(!is_known("domain/unknown"));
    }
}
