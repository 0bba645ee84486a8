/// Indentation-aware line builder for Go source.
///
/// Go is indented with tabs; `open`/`close` adjust depth around braces.
#[derive(Debug, Default, Clone)]
pub struct GoWriter {
    buf: String,
    depth: usize,
}

impl GoWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a given indentation depth (e.g. inside a `var (` group).
    pub fn with_depth(depth: usize) -> Self {
        Self {
            buf: String::new(),
            depth,
        }
    }

    /// Write one line at the current depth. Empty text writes a bare newline.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push('\t');
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    pub fn comment(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(format!("// {}", text.as_ref()))
    }

    /// Write `text` and indent the following lines.
    pub fn open(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(text);
        self.depth += 1;
        self
    }

    /// Dedent and write `text`.
    pub fn close(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(text)
    }

    /// Write `name = value` rows with the `=` column aligned the way gofmt
    /// aligns consecutive specs in a group.
    pub fn aligned<N, V>(&mut self, rows: &[(N, V)]) -> &mut Self
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let width = rows
            .iter()
            .map(|(name, _)| name.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        for (name, value) in rows {
            let name = name.as_ref();
            let pad = width - name.chars().count();
            self.line(format!("{name}{} = {}", " ".repeat(pad), value.as_ref()));
        }
        self
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
