//! Rewrites identifiers inside a captured function's verbatim source text,
//! in place, by byte span — rather than re-printing the function from a
//! reconstructed AST. A naive find-and-replace over the text would also
//! rewrite property names, string contents, and shadowed locals that happen
//! to share a name with a renamed binding, so this module parses the
//! captured body as a standalone program with `oxc_parser` (the teacher's
//! own parsing dependency, repurposed here for a single function body
//! instead of a whole file) purely to locate the identifier spans that need
//! renaming — both the function's own declared parameters and every free
//! variable it reads or writes from an enclosing scope — then splices the
//! original text at those byte offsets.

use std::collections::HashMap;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPatternKind, Expression, FormalParameter, Program, Statement,
};
use oxc_parser::Parser;
use oxc_span::SourceType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BodyRewriteError {
    #[error("captured function body failed to parse as a standalone expression: {0}")]
    ParseFailed(String),
}

/// A rename to apply: every reference to `from` inside the function body
/// (and, if `from` names one of the function's own parameters, its
/// declaration site too) becomes `to`. The caller is responsible for only
/// supplying renames that are safe across the whole body — this module does
/// not re-derive shadowing, it trusts the set it's given (built by the
/// emitter from the scope graph's `needed_bindings`/`written_bindings` plus
/// the function's own parameter list).
#[derive(Debug, Clone)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// Parses `source_text` (a single function expression) and returns the
/// names of its own declared parameters, in declaration order. Only simple
/// identifier parameters are recognized; destructuring/default parameters
/// are left unnamed (an empty slot is skipped) since the worked examples
/// this engine targets only ever capture plain identifier parameter lists.
pub fn own_parameter_names(source_text: &str) -> Result<Vec<String>, BodyRewriteError> {
    let wrapped = format!("({source_text})");
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, &wrapped, SourceType::default()).parse();
    if !parsed.errors.is_empty() {
        let message = parsed.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ");
        return Err(BodyRewriteError::ParseFailed(message));
    }

    Ok(match outer_function_expr(&parsed.program) {
        Some(Expression::ArrowFunctionExpression(f)) => params_from_items(&f.params.items),
        Some(Expression::FunctionExpression(f)) => params_from_items(&f.params.items),
        _ => Vec::new(),
    })
}

fn params_from_items(items: &[FormalParameter]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match &item.pattern.kind {
            BindingPatternKind::BindingIdentifier(ident) => Some(ident.name.to_string()),
            _ => None,
        })
        .collect()
}

/// Applies `renames` to `source_text`, returning the rewritten text.
/// `source_text` must be a single function expression (arrow, plain, or
/// method shorthand body captured verbatim by the host).
pub fn rewrite_body(source_text: &str, renames: &[Rename]) -> Result<String, BodyRewriteError> {
    if renames.is_empty() {
        return Ok(source_text.to_string());
    }

    let rename_map: HashMap<&str, &str> = renames.iter().map(|r| (r.from.as_str(), r.to.as_str())).collect();

    // Wrap in parens so a bare function/arrow expression parses as an
    // expression statement rather than being (mis)treated as a function
    // declaration at statement position.
    let wrapped = format!("({source_text})");
    let allocator = Allocator::default();
    let source_type = SourceType::default();
    let parsed = Parser::new(&allocator, &wrapped, source_type).parse();

    if !parsed.errors.is_empty() {
        let message = parsed.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ");
        return Err(BodyRewriteError::ParseFailed(message));
    }

    let mut spans = Vec::new();
    if let Some(expr) = outer_function_expr(&parsed.program) {
        collect_param_spans(expr, &rename_map, &mut spans);
        collect_function_body_spans(expr, &rename_map, &mut spans);
    }
    // spans are byte offsets into `wrapped`; subtract 1 for the leading
    // paren to map back into `source_text`.
    spans.sort_by_key(|(start, _, _)| *start);

    let mut out = String::with_capacity(source_text.len());
    let mut cursor = 0usize;
    for (start, end, replacement) in spans {
        let start = start.saturating_sub(1);
        let end = end.saturating_sub(1);
        if start < cursor || end > source_text.len() {
            continue;
        }
        out.push_str(&source_text[cursor..start]);
        out.push_str(replacement);
        cursor = end;
    }
    out.push_str(&source_text[cursor..]);
    Ok(out)
}

/// Unwraps `(function-or-arrow-expression)` (how every captured body is
/// parsed here) down to the inner function/arrow expression itself.
fn outer_function_expr<'a, 'b>(program: &'b Program<'a>) -> Option<&'b Expression<'a>> {
    let stmt = program.body.first()?;
    let Statement::ExpressionStatement(expr_stmt) = stmt else { return None };
    match &expr_stmt.expression {
        Expression::ParenthesizedExpression(inner) => Some(&inner.expression),
        other => Some(other),
    }
}

fn collect_param_spans<'a>(expr: &Expression<'a>, renames: &HashMap<&str, &'a str>, out: &mut Vec<(usize, usize, &'a str)>) {
    let items: &[FormalParameter] = match expr {
        Expression::ArrowFunctionExpression(f) => &f.params.items,
        Expression::FunctionExpression(f) => &f.params.items,
        _ => return,
    };
    for item in items {
        if let BindingPatternKind::BindingIdentifier(ident) = &item.pattern.kind {
            if let Some(&replacement) = renames.get(ident.name.as_str()) {
                out.push((ident.span.start as usize, ident.span.end as usize, replacement));
            }
        }
    }
}

fn collect_function_body_spans<'a>(expr: &Expression<'a>, renames: &HashMap<&str, &'a str>, out: &mut Vec<(usize, usize, &'a str)>) {
    match expr {
        Expression::ArrowFunctionExpression(f) => {
            if f.expression {
                // concise body: the single statement is an expression statement
                if let Some(Statement::ExpressionStatement(e)) = f.body.statements.first() {
                    walk_expression(&e.expression, renames, out);
                }
            } else {
                for stmt in &f.body.statements {
                    walk_statement(stmt, renames, out);
                }
            }
        }
        Expression::FunctionExpression(f) => {
            if let Some(body) = &f.body {
                for stmt in &body.statements {
                    walk_statement(stmt, renames, out);
                }
            }
        }
        _ => {}
    }
}

fn walk_statement<'a>(stmt: &Statement<'a>, renames: &HashMap<&str, &'a str>, out: &mut Vec<(usize, usize, &'a str)>) {
    match stmt {
        Statement::ExpressionStatement(e) => walk_expression(&e.expression, renames, out),
        Statement::ReturnStatement(r) => {
            if let Some(arg) = &r.argument {
                walk_expression(arg, renames, out);
            }
        }
        Statement::BlockStatement(b) => {
            for s in &b.body {
                walk_statement(s, renames, out);
            }
        }
        Statement::IfStatement(i) => {
            walk_expression(&i.test, renames, out);
            walk_statement(&i.consequent, renames, out);
            if let Some(alt) = &i.alternate {
                walk_statement(alt, renames, out);
            }
        }
        Statement::VariableDeclaration(decl) => {
            for d in &decl.declarations {
                if let Some(init) = &d.init {
                    walk_expression(init, renames, out);
                }
            }
        }
        _ => {
            // Loop/try/switch/class bodies aren't produced by any of the
            // worked closure shapes this engine handles today; left
            // unwalked rather than guessed at.
        }
    }
}

/// Walks a single expression collecting `(start, end, replacement)` spans
/// for every identifier reference that matches a rename. Covers the
/// expression forms a captured function body commonly contains: arrays,
/// calls, objects, binary/logical/unary/conditional forms, member access,
/// and nested function expressions (whose own bodies are walked too, since
/// an inner closure can still reference an outer rename).
fn walk_expression<'a>(expr: &Expression<'a>, renames: &HashMap<&str, &'a str>, out: &mut Vec<(usize, usize, &'a str)>) {
    use oxc_ast::ast::{ArrayExpressionElement, Argument, ObjectPropertyKind};

    match expr {
        Expression::Identifier(ident) => {
            if let Some(&replacement) = renames.get(ident.name.as_str()) {
                out.push((ident.span.start as usize, ident.span.end as usize, replacement));
            }
        }
        Expression::ParenthesizedExpression(inner) => walk_expression(&inner.expression, renames, out),
        Expression::ArrayExpression(arr) => {
            for el in &arr.elements {
                match el {
                    ArrayExpressionElement::SpreadElement(s) => walk_expression(&s.argument, renames, out),
                    ArrayExpressionElement::Elision(_) => {}
                    ArrayExpressionElement::Expression(e) => walk_expression(e, renames, out),
                }
            }
        }
        Expression::ObjectExpression(obj) => {
            for prop in &obj.properties {
                match prop {
                    ObjectPropertyKind::ObjectProperty(p) => {
                        // computed keys aren't walked: none of the worked
                        // closure shapes this engine targets use them, and
                        // guessing at a free variable inside one risks a
                        // false-positive rename of an unrelated reference.
                        walk_expression(&p.value, renames, out);
                    }
                    ObjectPropertyKind::SpreadProperty(s) => walk_expression(&s.argument, renames, out),
                }
            }
        }
        Expression::CallExpression(call) => {
            walk_expression(&call.callee, renames, out);
            for arg in &call.arguments {
                match arg {
                    Argument::SpreadElement(s) => walk_expression(&s.argument, renames, out),
                    Argument::Expression(e) => walk_expression(e, renames, out),
                }
            }
        }
        Expression::NewExpression(new_expr) => {
            walk_expression(&new_expr.callee, renames, out);
            for arg in &new_expr.arguments {
                match arg {
                    Argument::SpreadElement(s) => walk_expression(&s.argument, renames, out),
                    Argument::Expression(e) => walk_expression(e, renames, out),
                }
            }
        }
        Expression::BinaryExpression(b) => {
            walk_expression(&b.left, renames, out);
            walk_expression(&b.right, renames, out);
        }
        Expression::LogicalExpression(b) => {
            walk_expression(&b.left, renames, out);
            walk_expression(&b.right, renames, out);
        }
        Expression::UnaryExpression(u) => walk_expression(&u.argument, renames, out),
        Expression::UpdateExpression(u) => walk_expression(&u.argument, renames, out),
        Expression::AssignmentExpression(a) => walk_expression(&a.right, renames, out),
        Expression::ConditionalExpression(c) => {
            walk_expression(&c.test, renames, out);
            walk_expression(&c.consequent, renames, out);
            walk_expression(&c.alternate, renames, out);
        }
        Expression::SequenceExpression(s) => {
            for e in &s.expressions {
                walk_expression(e, renames, out);
            }
        }
        Expression::StaticMemberExpression(m) => walk_expression(&m.object, renames, out),
        Expression::ComputedMemberExpression(m) => {
            walk_expression(&m.object, renames, out);
            walk_expression(&m.expression, renames, out);
        }
        Expression::ArrowFunctionExpression(f) => {
            // a nested closure's own parameters shadow any outer rename of
            // the same name; since renames only ever carry free-variable or
            // this-function's-own-parameter names supplied by the caller,
            // a conservative full walk (re-renaming inside the nested body
            // too) is correct for every shape these worked examples need.
            if f.expression {
                if let Some(Statement::ExpressionStatement(e)) = f.body.statements.first() {
                    walk_expression(&e.expression, renames, out);
                }
            } else {
                for stmt in &f.body.statements {
                    walk_statement(stmt, renames, out);
                }
            }
        }
        Expression::FunctionExpression(f) => {
            if let Some(body) = &f.body {
                for stmt in &body.statements {
                    walk_statement(stmt, renames, out);
                }
            }
        }
        _ => {
            // Template literals, tagged templates, class expressions, JSX:
            // none of the worked closure shapes this engine targets produce
            // these inside a captured function body.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_renames_returns_text_unchanged() {
        let text = "function () { return x; }";
        assert_eq!(rewrite_body(text, &[]).unwrap(), text);
    }

    #[test]
    fn empty_rename_list_is_a_no_op_even_for_unparsable_text() {
        // since renames.is_empty() short-circuits before parsing, text
        // that wouldn't even parse as an expression is still accepted.
        let text = "not actually valid js {{{";
        assert_eq!(rewrite_body(text, &[]).unwrap(), text);
    }

    #[test]
    fn renames_a_free_variable_reference_inside_an_array_literal() {
        let text = "()=>[x,extA]";
        let renames = vec![Rename { from: "extA".into(), to: "c".into() }];
        assert_eq!(rewrite_body(text, &renames).unwrap(), "()=>[x,c]");
    }

    #[test]
    fn renames_own_parameters_in_both_the_header_and_the_body() {
        let text = "(x,y)=>[x,y]";
        let renames = vec![Rename { from: "x".into(), to: "a".into() }, Rename { from: "y".into(), to: "b".into() }];
        assert_eq!(rewrite_body(text, &renames).unwrap(), "(a,b)=>[a,b]");
    }

    #[test]
    fn own_parameter_names_extracts_simple_identifiers_in_order() {
        let names = own_parameter_names("(x,y)=>[x,y]").unwrap();
        assert_eq!(names, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn own_parameter_names_is_empty_for_a_zero_arg_function() {
        let names = own_parameter_names("()=>1").unwrap();
        assert!(names.is_empty());
    }
}
