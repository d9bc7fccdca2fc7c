//! Rewriting module specifiers inside a source file.
//!
//! The file is parsed with oxc, every module-specifier string literal is
//! collected, resolved through a [`ResolveSession`] in source order, and
//! rewrites are spliced back into the original text. Everything outside the
//! literals (formatting, comments, quotes) is left byte-for-byte intact.
//!
//! Recognized forms:
//!
//! ```js
//! import x from "utils";
//! export { y } from "utils/y";
//! export * from "utils/z";
//! const a = require("utils");
//! const b = require.resolve("utils/b");
//! const c = await import("utils/c");
//! ```

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, CallExpression, ExportAllDeclaration, ExportNamedDeclaration, Expression,
    ImportDeclaration, ImportExpression, StringLiteral,
};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;

use crate::error::{Error, Result};
use crate::resolver::{Resolution, ResolveSession};
use crate::table::AliasTable;

/// One replaced literal. Offsets are byte offsets into the original source
/// and cover the quotes; `original` and `replacement` are the bare
/// specifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub original: String,
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutput {
    pub code: String,
    pub edits: Vec<Edit>,
}

impl RewriteOutput {
    pub fn changed(&self) -> bool {
        !self.edits.is_empty()
    }
}

/// A specifier literal found in the program.
#[derive(Debug)]
struct SpecifierLiteral {
    start: usize,
    end: usize,
    value: String,
}

#[derive(Debug, Default)]
struct SpecifierCollector {
    literals: Vec<SpecifierLiteral>,
}

impl SpecifierCollector {
    fn push(&mut self, literal: &StringLiteral<'_>) {
        self.literals.push(SpecifierLiteral {
            start: literal.span.start as usize,
            end: literal.span.end as usize,
            value: literal.value.as_str().to_string(),
        });
    }
}

impl<'a> Visit<'a> for SpecifierCollector {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        self.push(&decl.source);
        walk::walk_import_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        self.push(&decl.source);
        walk::walk_export_all_declaration(self, decl);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &decl.source {
            self.push(source);
        }
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        if let Expression::StringLiteral(literal) = &expr.source {
            self.push(literal);
        }
        walk::walk_import_expression(self, expr);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if is_require(&call.callee) {
            if let Some(Argument::StringLiteral(literal)) = call.arguments.first() {
                self.push(literal);
            }
        }
        walk::walk_call_expression(self, call);
    }
}

/// `require(...)` or `require.<member>(...)`.
fn is_require(callee: &Expression<'_>) -> bool {
    let is_require_ident =
        |expr: &Expression<'_>| matches!(expr, Expression::Identifier(ident) if ident.name.as_str() == "require");

    match callee {
        Expression::StaticMemberExpression(member) => is_require_ident(&member.object),
        Expression::ComputedMemberExpression(member) => is_require_ident(&member.object),
        other => is_require_ident(other),
    }
}

/// Resolve every module specifier in `source` and return the rewritten code.
pub fn rewrite_source(
    session: &mut ResolveSession<'_>,
    table: &AliasTable,
    path: &Path,
    source: &str,
) -> Result<RewriteOutput> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(path).unwrap_or(SourceType::mjs());

    let ParserReturn {
        program,
        errors,
        panicked,
        ..
    } = Parser::new(&allocator, source, source_type).parse();

    if panicked || !errors.is_empty() {
        let message = errors
            .first()
            .map(|e| e.message.to_string())
            .unwrap_or_else(|| "parser aborted".to_string());
        return Err(Error::Parse {
            path: path.to_path_buf(),
            message,
        });
    }

    let mut collector = SpecifierCollector::default();
    collector.visit_program(&program);
    let mut literals = collector.literals;
    literals.sort_by_key(|literal| literal.start);

    let mut edits = Vec::new();
    for literal in literals {
        let Resolution::Rewrite(replacement) = session.resolve(table, path, &literal.value)? else {
            continue;
        };
        edits.push(Edit {
            start: literal.start,
            end: literal.end,
            original: literal.value,
            replacement,
        });
    }

    let mut code = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in &edits {
        let quote = source[edit.start..].chars().next().unwrap_or('"');
        code.push_str(&source[cursor..edit.start]);
        code.push_str(&quoted(&edit.replacement, quote));
        cursor = edit.end;
    }
    code.push_str(&source[cursor..]);

    tracing::debug!(path = %path.display(), rewrites = edits.len(), "rewrote module specifiers");
    Ok(RewriteOutput { code, edits })
}

fn quoted(specifier: &str, quote: char) -> String {
    let mut out = String::with_capacity(specifier.len() + 2);
    out.push(quote);
    for ch in specifier.chars() {
        if ch == quote || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push(quote);
    out
}
