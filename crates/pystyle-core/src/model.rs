//! Structural model of one source file.
//!
//! The model is deliberately lighter than an AST: logical lines, definition
//! boundaries, and import statements — only what rules need. Building never
//! fails; malformed regions degrade to model-level diagnostics or are simply
//! absent, and rules skip what is not there.

use crate::lexer::{Token, TokenKind};
use crate::types::{Diagnostic, Severity, Span};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;

/// Diagnostic code for indentation the builder could not resolve.
pub const UNRESOLVABLE_INDENTATION_CODE: &str = "PS002";
/// Diagnostic name for indentation the builder could not resolve.
pub const UNRESOLVABLE_INDENTATION_NAME: &str = "unresolvable-indentation";

/// Standard-library module names used by the default import classifier.
///
/// Overridable via `standard_library_modules` in the configuration.
pub const DEFAULT_STANDARD_LIBRARY: &[&str] = &[
    "abc", "argparse", "array", "asyncio", "base64", "bisect", "builtins", "calendar", "cmath",
    "collections", "concurrent", "configparser", "contextlib", "copy", "csv", "ctypes",
    "dataclasses", "datetime", "decimal", "difflib", "dis", "email", "enum", "errno", "fnmatch",
    "fractions", "functools", "gc", "getpass", "gettext", "glob", "gzip", "hashlib", "heapq",
    "hmac", "html", "http", "importlib", "inspect", "io", "ipaddress", "itertools", "json",
    "keyword", "locale", "logging", "lzma", "marshal", "math", "mimetypes", "multiprocessing",
    "numbers", "operator", "os", "pathlib", "pickle", "pkgutil", "platform", "pprint", "pstats",
    "pty", "queue", "random", "re", "reprlib", "secrets", "select", "shlex", "shutil", "signal",
    "site", "socket", "socketserver", "sqlite3", "ssl", "stat", "statistics", "string", "struct",
    "subprocess", "sys", "sysconfig", "tarfile", "tempfile", "textwrap", "threading", "time",
    "timeit", "token", "tokenize", "traceback", "types", "typing", "unicodedata", "unittest",
    "urllib", "uuid", "venv", "warnings", "weakref", "xml", "zipfile", "zlib", "zoneinfo",
];

/// Origin classification of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportCategory {
    /// A standard-library module.
    Standard,
    /// A third-party package.
    ThirdParty,
    /// A module of the project itself.
    Local,
    /// Could not be classified (e.g., an empty module name).
    Unknown,
}

impl ImportCategory {
    /// Ordering rank: Standard < ThirdParty < Local. `Unknown` has no rank
    /// and is skipped by ordering rules.
    #[must_use]
    pub fn rank(self) -> Option<u8> {
        match self {
            Self::Standard => Some(0),
            Self::ThirdParty => Some(1),
            Self::Local => Some(2),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for ImportCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard library"),
            Self::ThirdParty => write!(f, "third-party"),
            Self::Local => write!(f, "local"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classifies import module names into categories.
///
/// The classifier is pluggable so callers can substitute project-specific
/// logic; [`DefaultClassifier`] implements the configured-allow-list
/// heuristic.
pub trait ImportClassifier: Send + Sync {
    /// Classifies a dotted module name.
    fn classify(&self, module: &str) -> ImportCategory;
}

/// Default classifier: embedded standard-library list, then configured local
/// prefixes, else third-party. Relative imports (leading dot) are local.
#[derive(Debug, Clone, Default)]
pub struct DefaultClassifier {
    stdlib: HashSet<String>,
    local_prefixes: Vec<String>,
}

impl DefaultClassifier {
    /// Creates a classifier from explicit module and prefix lists. An empty
    /// `stdlib` list selects the embedded [`DEFAULT_STANDARD_LIBRARY`].
    #[must_use]
    pub fn new(stdlib: &[String], local_prefixes: &[String]) -> Self {
        let stdlib = if stdlib.is_empty() {
            DEFAULT_STANDARD_LIBRARY
                .iter()
                .map(|s| (*s).to_string())
                .collect()
        } else {
            stdlib.iter().cloned().collect()
        };
        Self {
            stdlib,
            local_prefixes: local_prefixes.to_vec(),
        }
    }
}

impl ImportClassifier for DefaultClassifier {
    fn classify(&self, module: &str) -> ImportCategory {
        if module.is_empty() {
            return ImportCategory::Unknown;
        }
        if module.starts_with('.') {
            return ImportCategory::Local;
        }
        let root = module.split('.').next().unwrap_or(module);
        if self.stdlib.contains(root) {
            return ImportCategory::Standard;
        }
        if self.local_prefixes.iter().any(|p| p == root) {
            return ImportCategory::Local;
        }
        ImportCategory::ThirdParty
    }
}

/// One statement's worth of tokens, possibly spanning several physical lines
/// via continuation or open brackets.
#[derive(Debug, Clone)]
pub struct LogicalLine {
    /// Index range into the model's token vector.
    pub tokens: Range<usize>,
    /// Indentation depth (number of enclosing indents, not columns).
    pub indent_level: usize,
    /// Covered source region, terminator excluded.
    pub span: Span,
    /// Physical line the statement starts on (1-indexed).
    pub first_line: usize,
}

/// What kind of definition a [`Definition`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefKind {
    /// A `def` (or `async def`) function.
    Function,
    /// A `class`.
    Class,
}

/// One parameter of a function definition.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Parameter name, without `*`/`**` markers.
    pub name: String,
    /// Span of the name token.
    pub span: Span,
    /// Token index range of the default value, when present.
    pub default: Option<Range<usize>>,
}

/// A named function or class construct.
///
/// The definition tree is formed by `parent` back-references only; children
/// are recovered by [`StructuralModel::children_of`], never stored, so the
/// graph cannot cycle.
#[derive(Debug, Clone)]
pub struct Definition {
    /// Function or class.
    pub kind: DefKind,
    /// Declared name.
    pub name: String,
    /// Span of the name token.
    pub name_span: Span,
    /// Parameters, for functions.
    pub params: Vec<ParamSpec>,
    /// Decorator names, innermost last.
    pub decorators: Vec<String>,
    /// Base names, for classes.
    pub bases: Vec<String>,
    /// Span of the docstring statement, when one exists.
    pub docstring: Option<Span>,
    /// Header statement span.
    pub span: Span,
    /// Body region; empty when the body could not be recovered.
    pub body_span: Span,
    /// Logical-line index of the header.
    pub header_line: usize,
    /// Logical-line index range of the body.
    pub body_lines: Range<usize>,
    /// Index of the enclosing definition, if any.
    pub parent: Option<usize>,
    /// Indentation depth of the header.
    pub indent_level: usize,
}

impl Definition {
    /// Returns true for names the project exports by convention.
    #[must_use]
    pub fn is_public(&self) -> bool {
        !self.name.starts_with('_')
    }
}

/// One bound name introduced by an import statement.
#[derive(Debug, Clone)]
pub struct ImportStatement {
    /// Dotted module path (for `from` imports, the source module).
    pub module: String,
    /// The name this import binds in the file.
    pub binding: String,
    /// Alias, when bound via `as`.
    pub alias: Option<String>,
    /// Origin classification.
    pub category: ImportCategory,
    /// Span of this import clause.
    pub span: Span,
    /// Position among all imports in the file.
    pub order_index: usize,
    /// True when the statement sits at module level.
    pub top_level: bool,
}

/// The shallow structural tree built from one token stream.
#[derive(Debug)]
pub struct StructuralModel<'a> {
    /// All tokens of the file, in source order.
    pub tokens: Vec<Token<'a>>,
    /// Logical lines, in source order.
    pub logical_lines: Vec<LogicalLine>,
    /// Definitions, in header order.
    pub definitions: Vec<Definition>,
    /// Import clauses, in source order.
    pub imports: Vec<ImportStatement>,
    /// Diagnostics produced while building (unresolvable indentation).
    pub diagnostics: Vec<Diagnostic>,
    /// Physical lines lying inside multi-line string literals (the opening
    /// line excluded).
    pub string_interior_lines: HashSet<usize>,
}

impl<'a> StructuralModel<'a> {
    /// Builds the model from a token stream.
    #[must_use]
    pub fn build(tokens: Vec<Token<'a>>, classifier: &dyn ImportClassifier) -> Self {
        let mut model = Self {
            tokens,
            logical_lines: Vec::new(),
            definitions: Vec::new(),
            imports: Vec::new(),
            diagnostics: Vec::new(),
            string_interior_lines: HashSet::new(),
        };
        model.collect_logical_lines();
        model.collect_string_interiors();
        model.collect_structure(classifier);
        model
    }

    /// Tokens of one logical line.
    #[must_use]
    pub fn line_tokens(&self, line: &LogicalLine) -> &[Token<'a>] {
        &self.tokens[line.tokens.clone()]
    }

    /// Indices of one logical line's significant tokens (trivia excluded).
    #[must_use]
    pub fn significant_indices(&self, line: &LogicalLine) -> Vec<usize> {
        line.tokens
            .clone()
            .filter(|&i| !self.tokens[i].kind.is_trivia())
            .collect()
    }

    /// Child definitions of the definition at `parent`, recovered by a
    /// forward scan over the definition list.
    pub fn children_of(&self, parent: usize) -> impl Iterator<Item = &Definition> {
        self.definitions
            .iter()
            .filter(move |d| d.parent == Some(parent))
    }

    fn collect_logical_lines(&mut self) {
        let mut depth = 0usize;
        let mut bracket = 0usize;
        let mut start: Option<(usize, usize)> = None; // (token index, depth at open)
        let mut continuation = false;

        for i in 0..self.tokens.len() {
            let token = self.tokens[i];
            match token.kind {
                TokenKind::Indent => depth += 1,
                TokenKind::Dedent => depth = depth.saturating_sub(1),
                TokenKind::Comment => {}
                TokenKind::Newline | TokenKind::EndOfInput => {
                    if bracket == 0 && !continuation {
                        self.flush_line(&mut start, i);
                    }
                    continuation = false;
                }
                TokenKind::Error => {
                    if start.is_none() && is_indent_error(&token) {
                        self.diagnostics.push(Diagnostic::new(
                            UNRESOLVABLE_INDENTATION_CODE,
                            UNRESOLVABLE_INDENTATION_NAME,
                            Severity::Warning,
                            token.span,
                            "indentation does not match any enclosing level",
                        ));
                    } else if start.is_none() {
                        start = Some((i, depth));
                    }
                }
                _ => {
                    if start.is_none() {
                        start = Some((i, depth));
                    }
                    if token.is_operator("\\") {
                        continuation = true;
                    }
                    match token.text {
                        "(" | "[" | "{" => bracket += 1,
                        ")" | "]" | "}" => bracket = bracket.saturating_sub(1),
                        _ => {}
                    }
                }
            }
        }
        let end = self.tokens.len();
        self.flush_line(&mut start, end);
    }

    fn flush_line(&mut self, start: &mut Option<(usize, usize)>, end: usize) {
        let Some((first, depth)) = start.take() else {
            return;
        };
        if first >= end {
            return;
        }
        let span = Span::new(
            self.tokens[first].span.start,
            self.tokens[end - 1].span.end,
        );
        self.logical_lines.push(LogicalLine {
            tokens: first..end,
            indent_level: depth,
            span,
            first_line: self.tokens[first].span.start.line,
        });
    }

    fn collect_string_interiors(&mut self) {
        for token in &self.tokens {
            if matches!(token.kind, TokenKind::StringLiteral | TokenKind::Error)
                && token.span.end.line > token.span.start.line
                && token.text.starts_with(['"', '\'', 'r', 'R', 'b', 'B', 'u', 'U', 'f', 'F'])
            {
                for line in token.span.start.line + 1..=token.span.end.line {
                    self.string_interior_lines.insert(line);
                }
            }
        }
    }

    fn collect_structure(&mut self, classifier: &dyn ImportClassifier) {
        let mut open_defs: Vec<usize> = Vec::new();
        let mut pending_decorators: Vec<String> = Vec::new();
        let mut order_index = 0usize;

        for li in 0..self.logical_lines.len() {
            let line = self.logical_lines[li].clone();

            while let Some(&d) = open_defs.last() {
                if line.indent_level <= self.definitions[d].indent_level {
                    self.definitions[d].body_lines.end = li;
                    open_defs.pop();
                } else {
                    break;
                }
            }

            let sig = self.significant_indices(&line);
            let Some(&first) = sig.first() else { continue };

            if self.tokens[first].is_operator("@") {
                pending_decorators.push(self.decorator_name(&sig[1..]));
                continue;
            }

            let header = self.parse_definition_header(&line, &sig, li, open_defs.last().copied());
            if let Some(mut definition) = header {
                definition.decorators = std::mem::take(&mut pending_decorators);
                self.definitions.push(definition);
                open_defs.push(self.definitions.len() - 1);
                continue;
            }
            pending_decorators.clear();

            if self.tokens[first].is_keyword("import") || self.tokens[first].is_keyword("from") {
                self.parse_imports(&line, &sig, classifier, &mut order_index);
            }
        }

        let line_count = self.logical_lines.len();
        for &d in &open_defs {
            self.definitions[d].body_lines.end = line_count;
        }
        self.resolve_bodies();
    }

    /// Fills body spans and docstrings once body line ranges are known.
    fn resolve_bodies(&mut self) {
        for d in 0..self.definitions.len() {
            let body = self.definitions[d].body_lines.clone();
            if body.is_empty() {
                let end = self.definitions[d].span.end;
                self.definitions[d].body_span = Span::point(end);
                continue;
            }
            let start = self.logical_lines[body.start].span.start;
            let end = self.logical_lines[body.end - 1].span.end;
            self.definitions[d].body_span = Span::new(start, end);

            let first_body = self.logical_lines[body.start].clone();
            let sig = self.significant_indices(&first_body);
            if let [only] = &sig[..] {
                if self.tokens[*only].kind == TokenKind::StringLiteral {
                    self.definitions[d].docstring = Some(self.tokens[*only].span);
                }
            }
        }
    }

    fn decorator_name(&self, sig: &[usize]) -> String {
        let mut name = String::new();
        for &i in sig {
            let token = self.tokens[i];
            match token.kind {
                TokenKind::Identifier => name.push_str(token.text),
                TokenKind::Operator if token.text == "." => name.push('.'),
                _ => break,
            }
        }
        name
    }

    fn parse_definition_header(
        &self,
        line: &LogicalLine,
        sig: &[usize],
        li: usize,
        parent: Option<usize>,
    ) -> Option<Definition> {
        let mut cursor = 0usize;
        if self.tokens[*sig.first()?].is_keyword("async") {
            cursor = 1;
        }
        let kw = self.tokens[*sig.get(cursor)?];
        let kind = if kw.is_keyword("def") {
            DefKind::Function
        } else if kw.is_keyword("class") {
            DefKind::Class
        } else {
            return None;
        };
        let name_token = self.tokens[*sig.get(cursor + 1)?];
        if name_token.kind != TokenKind::Identifier {
            return None;
        }

        let mut definition = Definition {
            kind,
            name: name_token.text.to_string(),
            name_span: name_token.span,
            params: Vec::new(),
            decorators: Vec::new(),
            bases: Vec::new(),
            docstring: None,
            span: line.span,
            body_span: Span::point(line.span.end),
            header_line: li,
            body_lines: li + 1..li + 1,
            parent,
            indent_level: line.indent_level,
        };

        if sig
            .get(cursor + 2)
            .is_some_and(|&i| self.tokens[i].is_operator("("))
        {
            let groups = self.split_argument_groups(sig, cursor + 2);
            match kind {
                DefKind::Function => {
                    definition.params = groups
                        .iter()
                        .filter_map(|g| self.parse_param(g))
                        .collect();
                }
                DefKind::Class => {
                    definition.bases = groups
                        .iter()
                        .map(|g| self.dotted_name(g))
                        .filter(|n| !n.is_empty())
                        .collect();
                }
            }
        }
        Some(definition)
    }

    /// Splits the bracketed argument list starting at `sig[open]` into
    /// top-level comma-separated groups of significant-token indices.
    fn split_argument_groups(&self, sig: &[usize], open: usize) -> Vec<Vec<usize>> {
        let mut groups = Vec::new();
        let mut current = Vec::new();
        let mut depth = 0usize;
        for &i in &sig[open..] {
            let token = self.tokens[i];
            match token.text {
                "(" | "[" | "{" if token.kind == TokenKind::Operator => {
                    if depth > 0 {
                        current.push(i);
                    }
                    depth += 1;
                }
                ")" | "]" | "}" if token.kind == TokenKind::Operator => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                    current.push(i);
                }
                "," if token.kind == TokenKind::Operator && depth == 1 => {
                    groups.push(std::mem::take(&mut current));
                }
                _ => {
                    if depth > 0 {
                        current.push(i);
                    }
                }
            }
        }
        if !current.is_empty() {
            groups.push(current);
        }
        groups.retain(|g| !g.is_empty());
        groups
    }

    fn parse_param(&self, group: &[usize]) -> Option<ParamSpec> {
        let name_idx = group
            .iter()
            .find(|&&i| self.tokens[i].kind == TokenKind::Identifier)?;
        let name_token = self.tokens[*name_idx];

        // Default value: everything after the top-level `=`, skipping any
        // `: annotation` segment before it.
        let mut depth = 0usize;
        let mut default = None;
        for (pos, &i) in group.iter().enumerate() {
            let token = self.tokens[i];
            match token.text {
                "(" | "[" | "{" if token.kind == TokenKind::Operator => depth += 1,
                ")" | "]" | "}" if token.kind == TokenKind::Operator => {
                    depth = depth.saturating_sub(1);
                }
                "=" if token.kind == TokenKind::Operator && depth == 0 => {
                    let rest = &group[pos + 1..];
                    if let (Some(&s), Some(&e)) = (rest.first(), rest.last()) {
                        default = Some(s..e + 1);
                    }
                    break;
                }
                _ => {}
            }
        }

        Some(ParamSpec {
            name: name_token.text.to_string(),
            span: name_token.span,
            default,
        })
    }

    fn dotted_name(&self, group: &[usize]) -> String {
        let mut name = String::new();
        for &i in group {
            let token = self.tokens[i];
            match token.kind {
                TokenKind::Identifier | TokenKind::Keyword => name.push_str(token.text),
                TokenKind::Operator if token.text == "." => name.push('.'),
                _ => break,
            }
        }
        name
    }

    fn parse_imports(
        &mut self,
        line: &LogicalLine,
        sig: &[usize],
        classifier: &dyn ImportClassifier,
        order_index: &mut usize,
    ) {
        let top_level = line.indent_level == 0;
        let mut entries = Vec::new();

        if self.tokens[sig[0]].is_keyword("from") {
            let (module, after) = self.parse_module_path(sig, 1);
            if !sig
                .get(after)
                .is_some_and(|&i| self.tokens[i].is_keyword("import"))
            {
                return;
            }
            let mut cursor = after + 1;
            while cursor < sig.len() {
                let token = self.tokens[sig[cursor]];
                if token.is_operator("*") {
                    entries.push((module.clone(), "*".to_string(), None, token.span));
                    break;
                }
                if token.is_operator("(") || token.is_operator(")") || token.is_operator(",") {
                    cursor += 1;
                    continue;
                }
                if token.kind != TokenKind::Identifier {
                    break;
                }
                let (binding, alias, span, next) = self.parse_alias_clause(sig, cursor);
                entries.push((module.clone(), binding, alias, span));
                cursor = next;
            }
        } else {
            let mut cursor = 1;
            while cursor < sig.len() {
                let (module, after) = self.parse_module_path(sig, cursor);
                if module.is_empty() {
                    break;
                }
                let start_span = self.tokens[sig[cursor]].span;
                let mut span = Span::new(start_span.start, self.tokens[sig[after - 1]].span.end);
                let mut alias = None;
                let mut next = after;
                if sig
                    .get(after)
                    .is_some_and(|&i| self.tokens[i].is_keyword("as"))
                {
                    if let Some(&alias_idx) = sig.get(after + 1) {
                        let alias_token = self.tokens[alias_idx];
                        if alias_token.kind == TokenKind::Identifier {
                            alias = Some(alias_token.text.to_string());
                            span.end = alias_token.span.end;
                            next = after + 2;
                        }
                    }
                }
                let binding = alias.clone().unwrap_or_else(|| {
                    module.split('.').next().unwrap_or(&module).to_string()
                });
                entries.push((module, binding, alias, span));
                if sig
                    .get(next)
                    .is_some_and(|&i| self.tokens[i].is_operator(","))
                {
                    cursor = next + 1;
                } else {
                    break;
                }
            }
        }

        for (module, binding, alias, span) in entries {
            let category = classifier.classify(&module);
            self.imports.push(ImportStatement {
                module,
                binding,
                alias,
                category,
                span,
                order_index: *order_index,
                top_level,
            });
            *order_index += 1;
        }
    }

    /// Parses a dotted (possibly relative) module path starting at
    /// `sig[start]`; returns the path and the index past it.
    fn parse_module_path(&self, sig: &[usize], start: usize) -> (String, usize) {
        let mut module = String::new();
        let mut cursor = start;
        while let Some(&i) = sig.get(cursor) {
            let token = self.tokens[i];
            match token.kind {
                TokenKind::Identifier => {
                    if module.ends_with(char::is_alphanumeric) || module.ends_with('_') {
                        break;
                    }
                    module.push_str(token.text);
                }
                TokenKind::Operator if token.text == "." => module.push('.'),
                TokenKind::Operator if token.text == "..." => module.push_str("..."),
                _ => break,
            }
            cursor += 1;
        }
        (module, cursor)
    }

    /// Parses `name [as alias]` at `sig[cursor]`; returns binding, alias,
    /// covered span, and the index past the clause.
    fn parse_alias_clause(
        &self,
        sig: &[usize],
        cursor: usize,
    ) -> (String, Option<String>, Span, usize) {
        let name_token = self.tokens[sig[cursor]];
        let mut span = name_token.span;
        let mut alias = None;
        let mut next = cursor + 1;
        if sig
            .get(next)
            .is_some_and(|&i| self.tokens[i].is_keyword("as"))
        {
            if let Some(&alias_idx) = sig.get(next + 1) {
                let alias_token = self.tokens[alias_idx];
                if alias_token.kind == TokenKind::Identifier {
                    alias = Some(alias_token.text.to_string());
                    span.end = alias_token.span.end;
                    next += 2;
                }
            }
        }
        let binding = alias.clone().unwrap_or_else(|| name_token.text.to_string());
        (binding, alias, span, next)
    }
}

/// True for recovery tokens the lexer emitted for unresolvable indentation.
fn is_indent_error(token: &Token<'_>) -> bool {
    !token.text.is_empty()
        && token
            .text
            .chars()
            .all(|c| matches!(c, ' ' | '\t' | '\x0c'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn build(source: &str) -> StructuralModel<'_> {
        let classifier = DefaultClassifier::new(&[], &[]);
        StructuralModel::build(tokenize(source).collect(), &classifier)
    }

    #[test]
    fn logical_lines_join_bracketed_continuations() {
        let model = build("x = [\n    1,\n    2,\n]\ny = 2\n");
        assert_eq!(model.logical_lines.len(), 2);
        assert_eq!(model.logical_lines[0].first_line, 1);
        assert_eq!(model.logical_lines[1].first_line, 5);
    }

    #[test]
    fn logical_lines_join_backslash_continuations() {
        let model = build("total = 1 + \\\n    2\n");
        assert_eq!(model.logical_lines.len(), 1);
    }

    #[test]
    fn definition_with_params_and_docstring() {
        let model = build("def add(a, b=2):\n    \"\"\"Adds.\"\"\"\n    return a + b\n");
        assert_eq!(model.definitions.len(), 1);
        let def = &model.definitions[0];
        assert_eq!(def.kind, DefKind::Function);
        assert_eq!(def.name, "add");
        assert_eq!(def.params.len(), 2);
        assert_eq!(def.params[1].name, "b");
        assert!(def.params[1].default.is_some());
        assert!(def.docstring.is_some());
    }

    #[test]
    fn methods_reference_their_class_via_parent() {
        let model = build(concat!(
            "class Greeter:\n",
            "    def hello(self):\n",
            "        pass\n",
            "    def bye(self):\n",
            "        pass\n",
        ));
        assert_eq!(model.definitions.len(), 3);
        assert_eq!(model.definitions[0].kind, DefKind::Class);
        assert_eq!(model.definitions[1].parent, Some(0));
        assert_eq!(model.definitions[2].parent, Some(0));
        let children: Vec<_> = model.children_of(0).map(|d| d.name.as_str()).collect();
        assert_eq!(children, vec!["hello", "bye"]);
    }

    #[test]
    fn class_bases_are_recorded() {
        let model = build("class ParseError(ValueError):\n    pass\n");
        assert_eq!(model.definitions[0].bases, vec!["ValueError".to_string()]);
    }

    #[test]
    fn decorators_attach_to_the_following_definition() {
        let model = build("@app.route\n@cached\ndef index():\n    pass\n");
        assert_eq!(
            model.definitions[0].decorators,
            vec!["app.route".to_string(), "cached".to_string()]
        );
    }

    #[test]
    fn missing_docstring_is_none_not_an_error() {
        let model = build("def f():\n    return 1\n");
        assert!(model.definitions[0].docstring.is_none());
        assert!(model.diagnostics.is_empty());
    }

    #[test]
    fn plain_imports_bind_root_component() {
        let model = build("import os.path\nimport collections as c\n");
        assert_eq!(model.imports.len(), 2);
        assert_eq!(model.imports[0].module, "os.path");
        assert_eq!(model.imports[0].binding, "os");
        assert_eq!(model.imports[1].binding, "c");
        assert_eq!(model.imports[1].alias.as_deref(), Some("c"));
    }

    #[test]
    fn from_imports_bind_each_name() {
        let model = build("from os.path import join, split as sp\n");
        assert_eq!(model.imports.len(), 2);
        assert_eq!(model.imports[0].module, "os.path");
        assert_eq!(model.imports[0].binding, "join");
        assert_eq!(model.imports[1].binding, "sp");
        assert_eq!(model.imports[1].order_index, 1);
    }

    #[test]
    fn multiple_modules_in_one_import_statement() {
        let model = build("import os, sys\n");
        let bindings: Vec<_> = model.imports.iter().map(|i| i.binding.as_str()).collect();
        assert_eq!(bindings, vec!["os", "sys"]);
    }

    #[test]
    fn classifier_distinguishes_categories() {
        let classifier =
            DefaultClassifier::new(&[], &["myproject".to_string()]);
        assert_eq!(classifier.classify("os.path"), ImportCategory::Standard);
        assert_eq!(classifier.classify("requests"), ImportCategory::ThirdParty);
        assert_eq!(classifier.classify("myproject.db"), ImportCategory::Local);
        assert_eq!(classifier.classify(".relative"), ImportCategory::Local);
        assert_eq!(classifier.classify(""), ImportCategory::Unknown);
    }

    #[test]
    fn classification_is_idempotent() {
        let classifier = DefaultClassifier::new(&[], &[]);
        let first = classifier.classify("json.decoder");
        for _ in 0..3 {
            assert_eq!(classifier.classify("json.decoder"), first);
        }
    }

    #[test]
    fn unresolvable_indentation_degrades_to_diagnostic() {
        let model = build("if x:\n    y = 1\n  z = 2\n");
        assert_eq!(model.diagnostics.len(), 1);
        assert_eq!(model.diagnostics[0].code, UNRESOLVABLE_INDENTATION_CODE);
        // The rest of the file is still modeled.
        assert!(model.logical_lines.len() >= 3);
    }

    #[test]
    fn string_interior_lines_are_tracked() {
        let model = build("s = \"\"\"one\ntwo\nthree\"\"\"\nx = 1\n");
        assert!(model.string_interior_lines.contains(&2));
        assert!(model.string_interior_lines.contains(&3));
        assert!(!model.string_interior_lines.contains(&1));
        assert!(!model.string_interior_lines.contains(&4));
    }

    #[test]
    fn empty_source_builds_empty_model() {
        let model = build("");
        assert!(model.logical_lines.is_empty());
        assert!(model.definitions.is_empty());
        assert!(model.imports.is_empty());
        assert!(model.diagnostics.is_empty());
    }
}
