//! Input aggregation: the code buffer the user edits and the file-upload path.
//!
//! The buffer is a list of lines plus a `(row, col)` cursor measured in chars.
//! `code()` joins the lines with `\n`, so text set through [`InputBuffer::set_code`]
//! comes back byte-for-byte.
//!
//! Uploading replaces the whole buffer with every selected file concatenated in
//! selection order, each behind a `// --- FILE: <name> ---` marker. A batch is
//! read concurrently and applied all-or-nothing.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;

use crate::types::Language;

/// Extensions accepted by the file-upload path (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["c", "cpp", "h", "hpp", "txt"];

/// A file read from disk for inclusion in the review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name only, without directories.
    pub name: String,
    pub content: String,
}

/// Returns `true` when `path` has an allow-listed extension.
pub fn is_allowed_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ALLOWED_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Drops paths whose extension is not allow-listed, logging each one.
pub fn filter_allowed(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|p| {
            let ok = is_allowed_file(p);
            if !ok {
                tracing::warn!(path = %p.display(), "skipping file with unsupported extension");
            }
            ok
        })
        .collect()
}

/// Reads every path as text, concurrently, preserving the order of `paths`.
///
/// Invalid UTF-8 is replaced rather than rejected. No size limit is applied.
///
/// # Errors
///
/// Returns the first `io::Error` encountered; in that case no file contents are
/// returned at all.
pub async fn read_sources(paths: &[PathBuf]) -> std::io::Result<Vec<SourceFile>> {
    try_join_all(paths.iter().map(|path| async move {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok::<_, std::io::Error>(SourceFile {
            name,
            content: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }))
    .await
}

/// Concatenates files as `// --- FILE: <name> ---\n\n<content>`, separated by a blank line.
pub fn combine_sources(files: &[SourceFile]) -> String {
    files
        .iter()
        .map(|f| format!("// --- FILE: {} ---\n\n{}", f.name, f.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The code being prepared for review and its language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    lines: Vec<String>,
    row: usize,
    col: usize,
    language: Language,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

/// Byte offset of char index `col` in `line`, clamped to the line end.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
}

impl InputBuffer {
    pub fn new(language: Language) -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            language,
        }
    }

    /// Full code text, lines joined with `\n`.
    pub fn code(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Cursor position as `(row, col)`, col counted in chars.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Replaces the whole text and puts the cursor at the start.
    pub fn set_code(&mut self, code: &str) {
        self.lines = code.split('\n').map(str::to_owned).collect();
        self.row = 0;
        self.col = 0;
    }

    /// Replaces the whole text with the combined contents of `files`.
    pub fn apply_sources(&mut self, files: &[SourceFile]) {
        self.set_code(&combine_sources(files));
    }

    /// `true` when the text is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self, loading: bool) -> bool {
        !loading && !self.is_blank()
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        let line = &mut self.lines[self.row];
        let at = byte_index(line, self.col);
        line.insert(at, c);
        self.col += 1;
    }

    /// Inserts `text` at the cursor; embedded newlines split lines.
    pub fn insert_str(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n");
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    pub fn insert_newline(&mut self) {
        let line = &mut self.lines[self.row];
        let at = byte_index(line, self.col);
        let rest = line.split_off(at);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    /// Deletes the char before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let at = byte_index(line, self.col - 1);
            line.remove(at);
            self.col -= 1;
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&current);
        }
    }

    /// Deletes the char under the cursor, joining with the next line at the end.
    pub fn delete(&mut self) {
        if self.col < self.line_len(self.row) {
            let line = &mut self.lines[self.row];
            let at = byte_index(line, self.col);
            line.remove(at);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.line_len(self.row);
    }

    pub fn clear(&mut self) {
        self.set_code("");
    }
}
