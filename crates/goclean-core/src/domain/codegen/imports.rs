use std::collections::BTreeSet;

/// Go import set, grouped and sorted the way goimports lays them out.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSet {
    std: BTreeSet<String>,
    external: BTreeSet<String>,
}

impl ImportSet {
    pub fn std(&mut self, path: impl Into<String>) -> &mut Self {
        self.std.insert(path.into());
        self
    }

    pub fn external(&mut self, path: impl Into<String>) -> &mut Self {
        self.external.insert(path.into());
        self
    }

    /// Add `path` to the group it belongs in.
    pub fn add(&mut self, path: impl Into<String>) -> &mut Self {
        let path = path.into();
        if is_std(&path) {
            self.std(path)
        } else {
            self.external(path)
        }
    }

    /// Every path, standard library first.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.std.iter().chain(&self.external).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.std.is_empty() && self.external.is_empty()
    }

    /// Render the import declaration followed by a blank line, or nothing
    /// when the set is empty.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        if self.std.len() + self.external.len() == 1 {
            let only = self.std.iter().chain(&self.external).next();
            return only.map_or_else(String::new, |path| format!("import \"{path}\"\n\n"));
        }

        let mut out = String::from("import (\n");
        for path in &self.std {
            out.push_str(&format!("\t\"{path}\"\n"));
        }
        if !self.std.is_empty() && !self.external.is_empty() {
            out.push('\n');
        }
        for path in &self.external {
            out.push_str(&format!("\t\"{path}\"\n"));
        }
        out.push_str(")\n\n");
        out
    }
}

/// Standard-library paths have no dot in their first segment.
fn is_std(path: &str) -> bool {
    !path.split('/').next().unwrap_or_default().contains('.')
}

/// The import declaration of a Go file, as a byte range plus its specs.
struct ImportDecl {
    start: usize,
    end: usize,
    specs: Vec<String>,
}

impl ImportDecl {
    /// First `import` declaration before any top-level declaration.
    fn find(content: &str) -> Option<Self> {
        let mut offset = 0;
        let mut lines = content.split_inclusive('\n');
        while let Some(line) = lines.next() {
            let start = offset;
            offset += line.len();
            let trimmed = line.trim_end();

            if trimmed == "import (" {
                let mut specs = Vec::new();
                for inner in lines.by_ref() {
                    offset += inner.len();
                    let inner = inner.trim();
                    if inner == ")" {
                        return Some(Self {
                            start,
                            end: offset,
                            specs,
                        });
                    }
                    if !inner.is_empty() {
                        specs.push(inner.to_string());
                    }
                }
                return None;
            }
            if let Some(spec) = trimmed.strip_prefix("import ") {
                return Some(Self {
                    start,
                    end: offset,
                    specs: vec![spec.trim().to_string()],
                });
            }
            if ["func ", "type ", "var ", "const "]
                .iter()
                .any(|kw| trimmed.starts_with(kw))
            {
                return None;
            }
        }
        None
    }

    fn imports(&self, path: &str) -> bool {
        self.specs.iter().any(|spec| spec_path(spec) == Some(path))
    }

    /// The specs as a plain set, or `None` if any carries an alias or comment.
    fn plain_set(&self) -> Option<ImportSet> {
        let mut set = ImportSet::default();
        for spec in &self.specs {
            let path = spec.strip_prefix('"')?.strip_suffix('"')?;
            set.add(path);
        }
        Some(set)
    }
}

/// Quoted path of an import spec, alias or not.
fn spec_path(spec: &str) -> Option<&str> {
    let open = spec.find('"')?;
    let close = spec.rfind('"')?;
    (close > open).then(|| &spec[open + 1..close])
}

/// `content` with every path in `required` imported.
///
/// The existing import declaration is re-rendered through [`ImportSet`] with
/// the missing paths added. A declaration using aliases or comments keeps its
/// specs verbatim and gets the new paths appended inside the parentheses. A
/// file without imports gets a declaration after its package clause.
pub fn ensure_imports(content: &str, required: &[String]) -> String {
    let decl = ImportDecl::find(content);
    let missing: Vec<&str> = required
        .iter()
        .map(String::as_str)
        .filter(|path| !decl.as_ref().is_some_and(|d| d.imports(path)))
        .collect();
    if missing.is_empty() {
        return content.to_string();
    }

    let Some(decl) = decl else {
        let mut set = ImportSet::default();
        for path in &missing {
            set.add(*path);
        }
        let split = content.find('\n').map_or(content.len(), |i| i + 1);
        return format!(
            "{}\n{}\n{}",
            &content[..split],
            set.render().trim_end(),
            &content[split..]
        );
    };

    let rendered = match decl.plain_set() {
        Some(mut set) => {
            for path in &missing {
                set.add(*path);
            }
            format!("{}\n", set.render().trim_end())
        }
        None => {
            let mut out = String::from("import (\n");
            for spec in &decl.specs {
                out.push_str(&format!("\t{spec}\n"));
            }
            for path in &missing {
                out.push_str(&format!("\t\"{path}\"\n"));
            }
            out.push_str(")\n");
            out
        }
    };
    format!("{}{rendered}{}", &content[..decl.start], &content[decl.end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_renders_nothing() {
        assert_eq!(ImportSet::default().render(), "");
    }

    #[test]
    fn single_import_is_inline() {
        let mut set = ImportSet::default();
        set.std("errors");
        assert_eq!(set.render(), "import \"errors\"\n\n");
    }

    #[test]
    fn groups_are_sorted_and_separated() {
        let mut set = ImportSet::default();
        set.external("gorm.io/gorm").std("time").std("fmt");
        assert_eq!(
            set.render(),
            "import (\n\t\"fmt\"\n\t\"time\"\n\n\t\"gorm.io/gorm\"\n)\n\n"
        );
    }

    #[test]
    fn paths_are_grouped_by_origin() {
        let mut set = ImportSet::default();
        set.add("github.com/acme/shop/internal/domain").add("context");
        assert_eq!(
            set.paths().collect::<Vec<_>>(),
            ["context", "github.com/acme/shop/internal/domain"]
        );
    }

    #[test]
    fn missing_import_joins_the_std_group() {
        let file = "package repository\n\nimport (\n\t\"context\"\n\n\t\"example.com/shop/internal/domain\"\n)\n\ntype A interface{}\n";
        let out = ensure_imports(file, &["time".to_string(), "context".to_string()]);
        assert_eq!(
            out,
            "package repository\n\nimport (\n\t\"context\"\n\t\"time\"\n\n\t\"example.com/shop/internal/domain\"\n)\n\ntype A interface{}\n"
        );
    }

    #[test]
    fn single_import_becomes_a_group() {
        let file = "package domain\n\nimport \"errors\"\n\nvar (\n)\n";
        let out = ensure_imports(file, &["fmt".to_string()]);
        assert_eq!(
            out,
            "package domain\n\nimport (\n\t\"errors\"\n\t\"fmt\"\n)\n\nvar (\n)\n"
        );
    }

    #[test]
    fn present_imports_leave_content_untouched() {
        let file = "package domain\n\nimport \"errors\"\n\nvar x = errors.New(\"time\")\n";
        assert_eq!(ensure_imports(file, &["errors".to_string()]), file);
    }

    #[test]
    fn aliased_specs_are_kept_verbatim() {
        let file = "package usecase\n\nimport (\n\tstdctx \"context\"\n)\n";
        let out = ensure_imports(file, &["context".to_string(), "time".to_string()]);
        assert_eq!(
            out,
            "package usecase\n\nimport (\n\tstdctx \"context\"\n\t\"time\"\n)\n"
        );
    }

    #[test]
    fn file_without_imports_gains_a_declaration() {
        let file = "package repository\n\ntype A interface{}\n";
        let out = ensure_imports(file, &["time".to_string()]);
        assert_eq!(out, "package repository\n\nimport \"time\"\n\ntype A interface{}\n");
    }
}
