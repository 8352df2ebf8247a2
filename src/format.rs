//! Whitespace normalization for generated source.
//!
//! `Formatter` is the seam; `Beautifier` is the bundled implementation. It
//! never reorders or drops tokens: it only decides where lines break and how
//! deep they are indented.

use serde::{Deserialize, Serialize};

pub trait Formatter {
    fn format(&self, text: &str, options: &FormatOptions) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    pub tab_indent: bool,
    pub width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { tab_indent: false, width: 4 }
    }
}

impl FormatOptions {
    pub fn indent_unit(&self) -> String {
        if self.tab_indent { "\t".to_string() } else { " ".repeat(self.width) }
    }
}

/// The three indentation choices offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum IndentStyle {
    #[default]
    #[value(name = "tabs")]
    #[serde(rename = "tabs")]
    Tabs,
    #[value(name = "2")]
    #[serde(rename = "2")]
    TwoSpaces,
    #[value(name = "4")]
    #[serde(rename = "4")]
    FourSpaces,
}

impl From<IndentStyle> for FormatOptions {
    fn from(style: IndentStyle) -> Self {
        match style {
            IndentStyle::Tabs => FormatOptions { tab_indent: true, width: 4 },
            IndentStyle::TwoSpaces => FormatOptions { tab_indent: false, width: 2 },
            IndentStyle::FourSpaces => FormatOptions { tab_indent: false, width: 4 },
        }
    }
}

// ------------------------------ Beautifier ------------------------------- //

/// Brace-aware reindenter for the generated model-definition source.
///
/// - one statement per line, one property per line inside `{ ... }`
/// - `{   }` collapses to `{}`
/// - blank-line runs collapse to one blank line
/// - string literals and comments are copied verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct Beautifier;

impl Formatter for Beautifier {
    fn format(&self, text: &str, options: &FormatOptions) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut w = LineWriter::new(options.indent_unit());
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '\'' | '"' | '`' => {
                    let end = scan_string(&chars, i);
                    w.token(&collect(&chars[i..end]));
                    i = end;
                    continue;
                }
                '/' if chars.get(i + 1) == Some(&'*') => {
                    let end = scan_block_comment(&chars, i);
                    w.block_comment(&collect(&chars[i..end]));
                    i = end;
                    continue;
                }
                '/' if chars.get(i + 1) == Some(&'/') => {
                    let end = chars[i..].iter().position(|&c| c == '\n').map_or(chars.len(), |p| i + p);
                    w.token(&collect(&chars[i..end]));
                    w.newline();
                    i = end;
                    continue;
                }
                c if c.is_whitespace() => {
                    let start = i;
                    while i < chars.len() && chars[i].is_whitespace() {
                        i += 1;
                    }
                    let newlines = chars[start..i].iter().filter(|&&c| c == '\n').count();
                    w.whitespace(newlines);
                    continue;
                }
                '{' => {
                    w.token("{");
                    let mut j = i + 1;
                    while j < chars.len() && chars[j].is_whitespace() {
                        j += 1;
                    }
                    if chars.get(j) == Some(&'}') {
                        w.punct("}");
                        i = j + 1;
                        continue;
                    }
                    w.open();
                }
                '}' => w.close(),
                ',' => {
                    w.punct(",");
                    if w.depth > 0 {
                        w.newline();
                    }
                }
                ';' => {
                    w.punct(";");
                    w.newline();
                }
                ')' | ']' => w.punct(&chars[i].to_string()),
                c => w.token(&c.to_string()),
            }
            i += 1;
        }

        w.finish()
    }
}

struct LineWriter {
    unit: String,
    lines: Vec<String>,
    current: String,
    depth: usize,
    pending_space: bool,
}

impl LineWriter {
    fn new(unit: String) -> Self {
        Self { unit, lines: Vec::new(), current: String::new(), depth: 0, pending_space: false }
    }

    fn token(&mut self, s: &str) {
        if self.pending_space && !self.current.is_empty() {
            self.current.push(' ');
        }
        self.pending_space = false;
        self.current.push_str(s);
    }

    // closing punctuation hugs the previous token
    fn punct(&mut self, s: &str) {
        self.pending_space = false;
        self.current.push_str(s);
    }

    fn whitespace(&mut self, newlines: usize) {
        if self.depth > 0 || newlines == 0 {
            self.pending_space = true;
            return;
        }
        self.newline();
        if newlines >= 2 {
            self.blank_line();
        }
    }

    fn open(&mut self) {
        self.newline();
        self.depth += 1;
    }

    fn close(&mut self) {
        self.newline();
        self.depth = self.depth.saturating_sub(1);
        self.current.push('}');
    }

    fn newline(&mut self) {
        let line = self.current.trim();
        if !line.is_empty() {
            let indented = format!("{}{}", self.unit.repeat(self.depth), line);
            self.lines.push(indented);
        }
        self.current.clear();
        self.pending_space = false;
    }

    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn block_comment(&mut self, comment: &str) {
        self.newline();
        let indent = self.unit.repeat(self.depth);
        for (idx, raw) in comment.lines().enumerate() {
            let line = raw.trim();
            let line = if idx > 0 && line.starts_with('*') { format!(" {line}") } else { line.to_string() };
            self.lines.push(format!("{indent}{line}"));
        }
    }

    fn finish(mut self) -> String {
        self.newline();
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        self.lines.join("\n")
    }
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

/// Index one past the closing quote (or end of input when unterminated).
fn scan_string(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}

fn scan_block_comment(chars: &[char], start: usize) -> usize {
    let mut i = start + 2;
    while i + 1 < chars.len() {
        if chars[i] == '*' && chars[i + 1] == '/' {
            return i + 2;
        }
        i += 1;
    }
    chars.len()
}

// ------------------------------- Tests ------------------------------------ //
