// ABOUTME: Declaration pre-pass warning about shadowed variable names

use crate::ast::{FunctionDecl, Stmt};
use crate::error::Diagnostics;
use std::collections::HashSet;

/// Walk every declaration and warn when a `var` re-uses a name that is
/// already declared in a reachable scope. Warnings never block evaluation.
pub fn analyze(statements: &[Stmt], diags: &mut Diagnostics) {
    let mut scopes = vec![HashSet::new()];
    for statement in statements {
        walk_statement(statement, &mut scopes, diags);
    }
}

fn walk_statement(stmt: &Stmt, scopes: &mut Vec<HashSet<String>>, diags: &mut Diagnostics) {
    match stmt {
        Stmt::Var { name, .. } => {
            if scopes.iter().any(|scope| scope.contains(&name.lexeme)) {
                diags.shadow_warning(name.line, name.lexeme.clone());
            }
            if let Some(scope) = scopes.last_mut() {
                scope.insert(name.lexeme.clone());
            }
        }
        Stmt::Block(statements) => {
            scopes.push(HashSet::new());
            for statement in statements {
                walk_statement(statement, scopes, diags);
            }
            scopes.pop();
        }
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => {
            walk_statement(then_branch, scopes, diags);
            if let Some(else_branch) = else_branch {
                walk_statement(else_branch, scopes, diags);
            }
        }
        Stmt::While { body, .. } => walk_statement(body, scopes, diags),
        Stmt::For {
            initializer, body, ..
        } => {
            // The initializer declares into the enclosing scope, matching
            // the evaluator
            walk_statement(initializer, scopes, diags);
            walk_statement(body, scopes, diags);
        }
        Stmt::Function(decl) => walk_function(decl, scopes, diags),
        Stmt::Struct { methods, .. } => {
            for method in methods {
                walk_function(method, scopes, diags);
            }
        }
        Stmt::Expression(_) | Stmt::Return { .. } => {}
    }
}

fn walk_function(decl: &FunctionDecl, scopes: &mut Vec<HashSet<String>>, diags: &mut Diagnostics) {
    let params: HashSet<String> = decl
        .params
        .iter()
        .map(|param| param.lexeme.clone())
        .collect();
    scopes.push(params);
    for statement in &decl.body {
        walk_statement(statement, scopes, diags);
    }
    scopes.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;
    use crate::parser::Parser;

    fn analyze_source(source: &str) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let tokens = lexer::scan(source.as_bytes(), &mut diags);
        let statements = Parser::new(tokens, &mut diags).parse();
        assert!(!diags.has_errors(), "unexpected errors: {:?}", diags.errors());
        analyze(&statements, &mut diags);
        diags
    }

    #[test]
    fn test_no_warning_for_distinct_names() {
        let diags = analyze_source("var a = 1; var b = 2;");
        assert!(diags.warnings().is_empty());
    }

    #[test]
    fn test_redeclaration_in_same_scope_warns() {
        let diags = analyze_source("var a = 1;\nvar a = 2;");
        assert_eq!(diags.warnings().len(), 1);
        assert_eq!(
            diags.warnings()[0].to_string(),
            "Shadow warning at line 2, Declaring an already declared variable: \"a\""
        );
    }

    #[test]
    fn test_inner_scope_shadowing_warns() {
        let diags = analyze_source("var a = 1; { var a = 2; }");
        assert_eq!(diags.warnings().len(), 1);
    }

    #[test]
    fn test_parameter_shadowed_by_local_warns() {
        let diags = analyze_source("function f(x) { var x = 1; }");
        assert_eq!(diags.warnings().len(), 1);
    }

    #[test]
    fn test_sibling_scopes_do_not_warn() {
        let diags = analyze_source("{ var a = 1; } { var a = 2; }");
        assert!(diags.warnings().is_empty());
    }

    #[test]
    fn test_warnings_do_not_count_as_errors() {
        let diags = analyze_source("var a = 1; var a = 2;");
        assert!(!diags.has_errors());
    }
}
