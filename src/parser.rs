// ABOUTME: Recursive-descent parser consuming tokens into statement trees

use crate::ast::{Expr, FunctionDecl, Stmt};
use crate::error::Diagnostics;
use crate::token::{Token, TokenKind};
use std::rc::Rc;

const AUGMENTED_OPS: [(TokenKind, TokenKind, &str); 5] = [
    (TokenKind::PlusEq, TokenKind::Plus, "+"),
    (TokenKind::MinusEq, TokenKind::Minus, "-"),
    (TokenKind::AsteriskEq, TokenKind::Asterisk, "*"),
    (TokenKind::SlashEq, TokenKind::Slash, "/"),
    (TokenKind::ModuloEq, TokenKind::Modulo, "%"),
];

/// Recursive-descent parser over a scanned token list. Syntax problems are
/// appended to the diagnostics collector and parsing continues best-effort;
/// the driver refuses to evaluate when any error was recorded.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    current: usize,
    diags: &'a mut Diagnostics,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, diags: &'a mut Diagnostics) -> Self {
        Parser {
            tokens,
            current: 0,
            diags,
        }
    }

    /// Parse the whole token stream into top-level statements.
    pub fn parse(mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            let before = self.current;
            statements.push(self.declaration());
            if self.current == before {
                // A declaration that consumed nothing would loop forever
                self.advance();
            }
        }
        statements
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn declaration(&mut self) -> Stmt {
        if self.matches(&[TokenKind::Var]) {
            return self.var_declaration();
        }
        self.statement()
    }

    fn var_declaration(&mut self) -> Stmt {
        let name = self.eat(TokenKind::Identifier, "Expect variable name");
        let initializer = if self.matches(&[TokenKind::Assign]) {
            Some(self.expression())
        } else {
            None
        };
        self.eat(
            TokenKind::Semicolon,
            "Expect ';' after variable declaration",
        );
        Stmt::Var { name, initializer }
    }

    fn statement(&mut self) -> Stmt {
        if self.matches(&[TokenKind::Function]) {
            return Stmt::Function(self.function_declaration());
        }
        if self.matches(&[TokenKind::Struct]) {
            return self.struct_declaration();
        }
        if self.matches(&[TokenKind::If]) {
            return self.if_statement();
        }
        if self.matches(&[TokenKind::Return]) {
            return self.return_statement();
        }
        if self.matches(&[TokenKind::For]) {
            return self.for_statement();
        }
        if self.matches(&[TokenKind::While]) {
            return self.while_statement();
        }
        if self.matches(&[TokenKind::LBrace]) {
            return Stmt::Block(self.block());
        }
        self.expression_statement()
    }

    fn function_declaration(&mut self) -> Rc<FunctionDecl> {
        let name = self.eat(TokenKind::Identifier, "Expect function name");
        self.eat(TokenKind::LParen, "Expect '(' after function name");

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                params.push(self.eat(TokenKind::Identifier, "Expect parameter name"));
                if !self.matches(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.eat(TokenKind::RParen, "Expect ')' after parameters");

        self.eat(TokenKind::LBrace, "Expect '{' before function body");
        let body = self.block();

        Rc::new(FunctionDecl { name, params, body })
    }

    fn struct_declaration(&mut self) -> Stmt {
        let name = self.eat(TokenKind::Identifier, "Expect struct name");
        self.eat(TokenKind::LBrace, "Expect '{' after struct name");

        let mut attributes = Vec::new();
        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if self.matches(&[TokenKind::Var]) {
                let attr_name = self.eat(TokenKind::Identifier, "Expect attribute name");
                let initializer = if self.matches(&[TokenKind::Assign]) {
                    Some(self.expression())
                } else {
                    None
                };
                self.eat(
                    TokenKind::Semicolon,
                    "Expect ';' after attribute declaration",
                );
                attributes.push((attr_name, initializer));
            } else if self.matches(&[TokenKind::Function]) {
                methods.push(self.function_declaration());
            } else {
                self.diags.syntax_error(
                    self.peek().line,
                    "Expect attribute or method declaration in struct body",
                );
                self.advance();
            }
        }
        self.eat(TokenKind::RBrace, "Expect '}' after struct body");

        Stmt::Struct {
            name,
            attributes,
            methods,
        }
    }

    fn if_statement(&mut self) -> Stmt {
        self.eat(TokenKind::LParen, "Expect '(' after 'if'");
        let condition = self.expression();
        self.eat(TokenKind::RParen, "Expect ')' after if condition");

        let then_branch = Box::new(self.statement());
        let else_branch = if self.matches(&[TokenKind::Else]) {
            self.eat(TokenKind::LBrace, "Expect '{' after 'else'");
            Some(Box::new(Stmt::Block(self.block())))
        } else {
            None
        };

        Stmt::If {
            condition,
            then_branch,
            else_branch,
        }
    }

    fn return_statement(&mut self) -> Stmt {
        let keyword = self.previous().clone();
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression())
        };
        self.eat(TokenKind::Semicolon, "Expect ';' after return value");
        Stmt::Return { keyword, value }
    }

    fn for_statement(&mut self) -> Stmt {
        self.eat(TokenKind::LParen, "Expect '(' after 'for'");

        let initializer = if self.matches(&[TokenKind::Var]) {
            Box::new(self.var_declaration())
        } else {
            Box::new(self.expression_statement())
        };

        let condition = self.expression();
        self.eat(TokenKind::Semicolon, "Expect ';' after loop condition");

        let step = self.expression();
        self.eat(TokenKind::RParen, "Expect ')' after for clauses");

        let body = Box::new(self.statement());

        Stmt::For {
            initializer,
            condition,
            step,
            body,
        }
    }

    fn while_statement(&mut self) -> Stmt {
        self.eat(TokenKind::LParen, "Expect '(' after 'while'");
        let condition = self.expression();
        self.eat(TokenKind::RParen, "Expect ')' after while condition");
        let body = Box::new(self.statement());
        Stmt::While { condition, body }
    }

    fn block(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let before = self.current;
            statements.push(self.declaration());
            if self.current == before {
                self.advance();
            }
        }
        self.eat(TokenKind::RBrace, "Expect '}' after block");
        statements
    }

    fn expression_statement(&mut self) -> Stmt {
        let expr = self.expression();
        self.eat(TokenKind::Semicolon, "Expect ';' after expression");
        Stmt::Expression(expr)
    }

    // ========================================================================
    // Expressions, in decreasing binding tightness
    // ========================================================================

    fn expression(&mut self) -> Expr {
        self.assignment()
    }

    fn assignment(&mut self) -> Expr {
        let expr = self.logical_or();

        if self.matches(&[TokenKind::Assign]) {
            let line = self.previous().line;
            let value = self.assignment();
            return self.build_assignment(expr, value, line);
        }

        for (kind, op_kind, op_lexeme) in AUGMENTED_OPS {
            if self.matches(&[kind]) {
                let line = self.previous().line;
                let operator = Token::new(op_kind, op_lexeme, line);
                let rhs = self.assignment();
                let value = Expr::Binary {
                    left: Box::new(expr.clone()),
                    operator,
                    right: Box::new(rhs),
                };
                return self.build_assignment(expr, value, line);
            }
        }

        if self.matches(&[TokenKind::PlusPlus, TokenKind::MinusMinus]) {
            let step = self.previous().clone();
            let operator = if step.kind == TokenKind::PlusPlus {
                Token::new(TokenKind::Plus, "+", step.line)
            } else {
                Token::new(TokenKind::Minus, "-", step.line)
            };
            let value = Expr::Binary {
                left: Box::new(expr.clone()),
                operator,
                right: Box::new(Expr::Number(1)),
            };
            return self.build_assignment(expr, value, step.line);
        }

        expr
    }

    /// Desugar an assignment by inspecting the already-parsed LHS shape:
    /// plain variable, index (a call with one argument), or attribute access.
    fn build_assignment(&mut self, target: Expr, value: Expr, line: usize) -> Expr {
        match target {
            Expr::Variable(name) => Expr::Assign {
                name,
                value: Box::new(value),
            },
            Expr::Call { callee, mut args } if args.len() == 1 => match *callee {
                Expr::Variable(name) => Expr::AssignIndex {
                    name,
                    index: Box::new(args.remove(0)),
                    value: Box::new(value),
                },
                _ => {
                    self.diags.syntax_error(line, "Invalid assignment target");
                    value
                }
            },
            Expr::Get {
                object, accessor, ..
            } => match (*object, *accessor) {
                (Expr::Variable(name), Expr::Variable(attribute)) => Expr::AssignAttr {
                    name,
                    attribute,
                    value: Box::new(value),
                },
                _ => {
                    self.diags.syntax_error(line, "Invalid assignment target");
                    value
                }
            },
            _ => {
                self.diags.syntax_error(line, "Invalid assignment target");
                value
            }
        }
    }

    fn logical_or(&mut self) -> Expr {
        let mut expr = self.logical_and();
        while self.matches(&[TokenKind::Or]) {
            let operator = self.previous().clone();
            let right = self.logical_and();
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        expr
    }

    fn logical_and(&mut self) -> Expr {
        let mut expr = self.equality();
        while self.matches(&[TokenKind::And]) {
            let operator = self.previous().clone();
            let right = self.equality();
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        expr
    }

    fn equality(&mut self) -> Expr {
        let mut expr = self.comparison();
        while self.matches(&[TokenKind::NotEq, TokenKind::Eq]) {
            let operator = self.previous().clone();
            let right = self.comparison();
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        expr
    }

    fn comparison(&mut self) -> Expr {
        let mut expr = self.addition();
        while self.matches(&[
            TokenKind::Gt,
            TokenKind::GtEq,
            TokenKind::Lt,
            TokenKind::LtEq,
        ]) {
            let operator = self.previous().clone();
            let right = self.addition();
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        expr
    }

    fn addition(&mut self) -> Expr {
        let mut expr = self.multiplication();
        while self.matches(&[TokenKind::Minus, TokenKind::Plus]) {
            let operator = self.previous().clone();
            let right = self.multiplication();
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        expr
    }

    fn multiplication(&mut self) -> Expr {
        let mut expr = self.unary();
        while self.matches(&[TokenKind::Asterisk, TokenKind::Slash, TokenKind::Modulo]) {
            let operator = self.previous().clone();
            let right = self.unary();
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        expr
    }

    fn unary(&mut self) -> Expr {
        if self.matches(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous().clone();
            let right = self.unary();
            return Expr::Unary {
                operator,
                right: Box::new(right),
            };
        }
        self.call()
    }

    fn call(&mut self) -> Expr {
        let mut expr = self.primary();

        loop {
            if self.matches(&[TokenKind::LParen]) {
                expr = self.finish_call(expr);
            } else if self.matches(&[TokenKind::LBracket]) {
                let index = self.expression();
                self.eat(TokenKind::RBracket, "Expect ']' after index");
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args: vec![index],
                };
            } else if self.matches(&[TokenKind::Dot]) {
                let name = self.eat(TokenKind::Identifier, "Expect attribute name after '.'");
                let accessor = Expr::Variable(name);
                if self.matches(&[TokenKind::LParen]) {
                    let call = self.finish_call(accessor);
                    expr = Expr::Get {
                        object: Box::new(expr),
                        accessor: Box::new(call),
                        is_method: true,
                    };
                } else {
                    expr = Expr::Get {
                        object: Box::new(expr),
                        accessor: Box::new(accessor),
                        is_method: false,
                    };
                }
            } else {
                break;
            }
        }

        expr
    }

    fn finish_call(&mut self, callee: Expr) -> Expr {
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.expression());
                if !self.matches(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.eat(TokenKind::RParen, "Expect ')' after arguments");
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    fn primary(&mut self) -> Expr {
        if self.matches(&[TokenKind::Number]) {
            let token = self.previous().clone();
            return match token.lexeme.parse::<i64>() {
                Ok(value) => Expr::Number(value),
                Err(_) => {
                    self.diags.syntax_error(
                        token.line,
                        format!("Number literal '{}' is out of range", token.lexeme),
                    );
                    Expr::Number(0)
                }
            };
        }
        if self.matches(&[TokenKind::Str]) {
            return Expr::Str(self.previous().lexeme.clone());
        }
        if self.matches(&[TokenKind::True]) {
            return Expr::Bool(true);
        }
        if self.matches(&[TokenKind::False]) {
            return Expr::Bool(false);
        }
        if self.matches(&[TokenKind::Identifier, TokenKind::This]) {
            return Expr::Variable(self.previous().clone());
        }
        if self.matches(&[TokenKind::LParen]) {
            let expr = self.expression();
            self.eat(TokenKind::RParen, "Expect ')' after expression");
            return Expr::Group(Box::new(expr));
        }
        if self.matches(&[TokenKind::LBracket]) {
            let mut elements = Vec::new();
            if !self.check(TokenKind::RBracket) {
                loop {
                    elements.push(self.expression());
                    if !self.matches(&[TokenKind::Comma]) {
                        break;
                    }
                }
            }
            self.eat(TokenKind::RBracket, "Expect ']' after list elements");
            return Expr::List(elements);
        }
        if self.matches(&[TokenKind::LBrace]) {
            let mut pairs = Vec::new();
            if !self.check(TokenKind::RBrace) {
                loop {
                    let key = self.expression();
                    self.eat(TokenKind::Colon, "Expect ':' between hash map key and value");
                    let value = self.expression();
                    pairs.push((key, value));
                    if !self.matches(&[TokenKind::Comma]) {
                        break;
                    }
                }
            }
            self.eat(TokenKind::RBrace, "Expect '}' after hash map entries");
            return Expr::HashMap(pairs);
        }

        let token = self.peek().clone();
        let shown = if token.kind == TokenKind::Eof {
            "end of input".to_string()
        } else {
            format!("'{}'", token.lexeme)
        };
        self.diags
            .syntax_error(token.line, format!("Expect expression, got {}", shown));
        self.advance();
        // Placeholder so parsing can continue; the driver never evaluates a
        // program that produced syntax errors
        Expr::Number(0)
    }

    // ========================================================================
    // Cursor helpers
    // ========================================================================

    fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the next token if it matches any of `kinds`.
    fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        for &kind in kinds {
            if self.check(kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    /// Consume a token of `kind` or record a syntax diagnostic. The cursor
    /// does not move on failure so an enclosing production can resume.
    fn eat(&mut self, kind: TokenKind, message: &str) -> Token {
        if self.check(kind) {
            self.advance();
            return self.previous().clone();
        }
        self.diags.syntax_error(self.peek().line, message);
        self.peek().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_ok(source: &str) -> Vec<Stmt> {
        let mut diags = Diagnostics::new();
        let tokens = lexer::scan(source.as_bytes(), &mut diags);
        let statements = Parser::new(tokens, &mut diags).parse();
        assert!(
            !diags.has_errors(),
            "unexpected diagnostics for {:?}: {:?}",
            source,
            diags.errors()
        );
        statements
    }

    fn parse_with_errors(source: &str) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let tokens = lexer::scan(source.as_bytes(), &mut diags);
        let _ = Parser::new(tokens, &mut diags).parse();
        assert!(diags.has_errors(), "expected diagnostics for {:?}", source);
        diags
    }

    fn parse_expression(source: &str) -> Expr {
        let statements = parse_ok(source);
        assert_eq!(statements.len(), 1);
        match statements.into_iter().next().unwrap() {
            Stmt::Expression(expr) => expr,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_groups_multiplication_tighter() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        let expr = parse_expression("1 + 2 * 3;");
        let Expr::Binary {
            left,
            operator,
            right,
        } = expr
        else {
            panic!("expected binary expression");
        };
        assert_eq!(operator.kind, TokenKind::Plus);
        assert_eq!(*left, Expr::Number(1));
        assert!(matches!(
            *right,
            Expr::Binary { ref operator, .. } if operator.kind == TokenKind::Asterisk
        ));
    }

    #[test]
    fn test_grouping_overrides_precedence() {
        let expr = parse_expression("(1 + 2) * 3;");
        let Expr::Binary { left, operator, .. } = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(operator.kind, TokenKind::Asterisk);
        assert!(matches!(*left, Expr::Group(_)));
    }

    #[test]
    fn test_unary_is_right_associative() {
        let expr = parse_expression("!!true;");
        let Expr::Unary { operator, right } = expr else {
            panic!("expected unary expression");
        };
        assert_eq!(operator.kind, TokenKind::Bang);
        assert!(matches!(*right, Expr::Unary { .. }));
    }

    #[test]
    fn test_assignment_desugars_to_plain_assign() {
        let expr = parse_expression("x = 1;");
        assert!(matches!(expr, Expr::Assign { ref name, .. } if name.lexeme == "x"));
    }

    #[test]
    fn test_index_assignment_desugars_to_assign_index() {
        let expr = parse_expression("xs[0] = 1;");
        let Expr::AssignIndex { name, index, value } = expr else {
            panic!("expected index assignment");
        };
        assert_eq!(name.lexeme, "xs");
        assert_eq!(*index, Expr::Number(0));
        assert_eq!(*value, Expr::Number(1));
    }

    #[test]
    fn test_attribute_assignment_desugars_to_assign_attr() {
        let expr = parse_expression("p.x = 1;");
        let Expr::AssignAttr {
            name, attribute, ..
        } = expr
        else {
            panic!("expected attribute assignment");
        };
        assert_eq!(name.lexeme, "p");
        assert_eq!(attribute.lexeme, "x");
    }

    #[test]
    fn test_increment_desugars_to_add_one() {
        let expr = parse_expression("x++;");
        let Expr::Assign { name, value } = expr else {
            panic!("expected assignment");
        };
        assert_eq!(name.lexeme, "x");
        let Expr::Binary {
            operator, right, ..
        } = *value
        else {
            panic!("expected binary value");
        };
        assert_eq!(operator.kind, TokenKind::Plus);
        assert_eq!(*right, Expr::Number(1));
    }

    #[test]
    fn test_augmented_assign_desugars_to_binary() {
        let expr = parse_expression("x *= 2 + 1;");
        let Expr::Assign { name, value } = expr else {
            panic!("expected assignment");
        };
        assert_eq!(name.lexeme, "x");
        let Expr::Binary { operator, .. } = *value else {
            panic!("expected binary value");
        };
        assert_eq!(operator.kind, TokenKind::Asterisk);
    }

    #[test]
    fn test_indexing_reuses_call_node() {
        let expr = parse_expression("xs[3];");
        let Expr::Call { callee, args } = expr else {
            panic!("expected call node");
        };
        assert!(matches!(*callee, Expr::Variable(ref name) if name.lexeme == "xs"));
        assert_eq!(args, vec![Expr::Number(3)]);
    }

    #[test]
    fn test_zero_argument_call() {
        let expr = parse_expression("f();");
        let Expr::Call { args, .. } = expr else {
            panic!("expected call node");
        };
        assert!(args.is_empty());
    }

    #[test]
    fn test_empty_list_literal() {
        assert_eq!(parse_expression("[];"), Expr::List(Vec::new()));
    }

    #[test]
    fn test_empty_hash_map_literal() {
        // `{}` is a hash map only in expression position; statement position
        // parses it as an empty block
        let statements = parse_ok("var x = {};");
        let Stmt::Var {
            initializer: Some(Expr::HashMap(pairs)),
            ..
        } = &statements[0]
        else {
            panic!("expected hash map initializer");
        };
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_hash_map_literal_in_initializer() {
        let statements = parse_ok("var m = {0: 10, 1: 20};");
        let Stmt::Var {
            initializer: Some(Expr::HashMap(pairs)),
            ..
        } = &statements[0]
        else {
            panic!("expected hash map initializer");
        };
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_method_access_parses_as_get() {
        let expr = parse_expression("p.size();");
        let Expr::Get {
            accessor,
            is_method,
            ..
        } = expr
        else {
            panic!("expected get node");
        };
        assert!(is_method);
        assert!(matches!(*accessor, Expr::Call { .. }));
    }

    #[test]
    fn test_function_declaration_parses_params_and_body() {
        let statements = parse_ok("function add(a, b) { return a + b; }");
        let Stmt::Function(decl) = &statements[0] else {
            panic!("expected function declaration");
        };
        assert_eq!(decl.name.lexeme, "add");
        assert_eq!(decl.params.len(), 2);
        assert_eq!(decl.body.len(), 1);
        assert!(matches!(decl.body[0], Stmt::Return { .. }));
    }

    #[test]
    fn test_struct_declaration_collects_attributes_and_methods() {
        let statements = parse_ok(
            "struct Point { var x = 0; var y = 0; function sum() { return 0; } }",
        );
        let Stmt::Struct {
            name,
            attributes,
            methods,
        } = &statements[0]
        else {
            panic!("expected struct declaration");
        };
        assert_eq!(name.lexeme, "Point");
        assert_eq!(attributes.len(), 2);
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name.lexeme, "sum");
    }

    #[test]
    fn test_for_statement_shape() {
        let statements = parse_ok("for (var i = 0; i < 10; i++) { }");
        let Stmt::For {
            initializer,
            condition,
            step,
            ..
        } = &statements[0]
        else {
            panic!("expected for statement");
        };
        assert!(matches!(**initializer, Stmt::Var { .. }));
        assert!(matches!(condition, Expr::Binary { .. }));
        assert!(matches!(step, Expr::Assign { .. }));
    }

    #[test]
    fn test_missing_semicolon_is_reported() {
        let diags = parse_with_errors("1 + 2");
        assert!(diags
            .errors()
            .iter()
            .any(|e| e.to_string().contains("Expect ';' after expression")));
    }

    #[test]
    fn test_invalid_assignment_target_is_reported() {
        let diags = parse_with_errors("1 = 2;");
        assert!(diags
            .errors()
            .iter()
            .any(|e| e.to_string().contains("Invalid assignment target")));
    }

    #[test]
    fn test_parser_survives_garbage_without_hanging() {
        let mut diags = Diagnostics::new();
        let tokens = lexer::scan(b") ) ; } var", &mut diags);
        let _ = Parser::new(tokens, &mut diags).parse();
        assert!(diags.has_errors());
    }
}
