// ABOUTME: Byte scanner turning source text into a token stream

use crate::error::Diagnostics;
use crate::token::{byte_string, lookup_keyword, Token, TokenKind};

/// Scan `source` into tokens. The input is raw 8-bit bytes; string-literal
/// interiors pass through unchanged. Unrecognized bytes and unterminated
/// strings are recorded as syntax diagnostics and skipped; scanning always
/// produces a token list terminated by `Eof`.
pub fn scan(source: &[u8], diags: &mut Diagnostics) -> Vec<Token> {
    Scanner::new(source).scan(diags)
}

struct Scanner<'a> {
    source: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a [u8]) -> Self {
        Scanner {
            source,
            pos: 0,
            line: 1,
        }
    }

    fn scan(mut self, diags: &mut Diagnostics) -> Vec<Token> {
        let mut tokens = Vec::new();

        while self.pos < self.source.len() {
            let byte = self.source[self.pos];
            match byte {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'\n' => {
                    self.pos += 1;
                    self.line += 1;
                }
                b'+' => tokens.push(self.operator(
                    TokenKind::Plus,
                    &[(b'+', TokenKind::PlusPlus), (b'=', TokenKind::PlusEq)],
                )),
                b'-' => tokens.push(self.operator(
                    TokenKind::Minus,
                    &[(b'-', TokenKind::MinusMinus), (b'=', TokenKind::MinusEq)],
                )),
                b'*' => {
                    tokens.push(self.operator(TokenKind::Asterisk, &[(b'=', TokenKind::AsteriskEq)]))
                }
                b'/' => {
                    if self.peek_next() == Some(b'/') {
                        // Line comment, discard up to (not including) the newline
                        while self.pos < self.source.len() && self.source[self.pos] != b'\n' {
                            self.pos += 1;
                        }
                    } else {
                        tokens.push(self.operator(TokenKind::Slash, &[(b'=', TokenKind::SlashEq)]));
                    }
                }
                b'%' => tokens.push(self.operator(TokenKind::Modulo, &[(b'=', TokenKind::ModuloEq)])),
                b'!' => tokens.push(self.operator(TokenKind::Bang, &[(b'=', TokenKind::NotEq)])),
                b'=' => tokens.push(self.operator(TokenKind::Assign, &[(b'=', TokenKind::Eq)])),
                b'<' => tokens.push(self.operator(TokenKind::Lt, &[(b'=', TokenKind::LtEq)])),
                b'>' => tokens.push(self.operator(TokenKind::Gt, &[(b'=', TokenKind::GtEq)])),
                b'&' => {
                    if self.peek_next() == Some(b'&') {
                        tokens.push(Token::new(TokenKind::And, "&&", self.line));
                        self.pos += 2;
                    } else {
                        diags.syntax_error(self.line, "Unexpected character '&'");
                        self.pos += 1;
                    }
                }
                b'|' => {
                    if self.peek_next() == Some(b'|') {
                        tokens.push(Token::new(TokenKind::Or, "||", self.line));
                        self.pos += 2;
                    } else {
                        diags.syntax_error(self.line, "Unexpected character '|'");
                        self.pos += 1;
                    }
                }
                b'.' => tokens.push(self.single(TokenKind::Dot, ".")),
                b',' => tokens.push(self.single(TokenKind::Comma, ",")),
                b':' => tokens.push(self.single(TokenKind::Colon, ":")),
                b';' => tokens.push(self.single(TokenKind::Semicolon, ";")),
                b'(' => tokens.push(self.single(TokenKind::LParen, "(")),
                b')' => tokens.push(self.single(TokenKind::RParen, ")")),
                b'{' => tokens.push(self.single(TokenKind::LBrace, "{")),
                b'}' => tokens.push(self.single(TokenKind::RBrace, "}")),
                b'[' => tokens.push(self.single(TokenKind::LBracket, "[")),
                b']' => tokens.push(self.single(TokenKind::RBracket, "]")),
                b'"' => {
                    if let Some(token) = self.string(diags) {
                        tokens.push(token);
                    }
                }
                b'0'..=b'9' => tokens.push(self.number()),
                b'A'..=b'Z' | b'a'..=b'z' | b'_' => tokens.push(self.identifier()),
                other => {
                    diags.syntax_error(
                        self.line,
                        format!("Unexpected character '{}'", other as char),
                    );
                    self.pos += 1;
                }
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.line));
        tokens
    }

    fn peek_next(&self) -> Option<u8> {
        self.source.get(self.pos + 1).copied()
    }

    fn single(&mut self, kind: TokenKind, lexeme: &str) -> Token {
        self.pos += 1;
        Token::new(kind, lexeme, self.line)
    }

    /// Emit a one- or two-character operator, trying the two-character
    /// continuations first.
    fn operator(&mut self, one: TokenKind, pairs: &[(u8, TokenKind)]) -> Token {
        let start = self.pos;
        self.pos += 1;
        if let Some(next) = self.source.get(self.pos).copied() {
            for &(second, kind) in pairs {
                if next == second {
                    self.pos += 1;
                    return Token::new(kind, self.lexeme(start), self.line);
                }
            }
        }
        Token::new(one, self.lexeme(start), self.line)
    }

    fn string(&mut self, diags: &mut Diagnostics) -> Option<Token> {
        let opening_line = self.line;
        self.pos += 1;
        let start = self.pos;

        while self.pos < self.source.len() && self.source[self.pos] != b'"' {
            if self.source[self.pos] == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }

        if self.pos >= self.source.len() {
            diags.syntax_error(opening_line, "Unterminated string");
            return None;
        }

        // Lexeme is the unquoted interior
        let token = Token::new(TokenKind::Str, self.lexeme(start), opening_line);
        self.pos += 1;
        Some(token)
    }

    fn number(&mut self) -> Token {
        let start = self.pos;
        while self.pos < self.source.len() && self.source[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        Token::new(TokenKind::Number, self.lexeme(start), self.line)
    }

    fn identifier(&mut self) -> Token {
        let start = self.pos;
        while self.pos < self.source.len()
            && (self.source[self.pos].is_ascii_alphanumeric() || self.source[self.pos] == b'_')
        {
            self.pos += 1;
        }
        let lexeme = self.lexeme(start);
        let kind = lookup_keyword(&lexeme).unwrap_or(TokenKind::Identifier);
        Token::new(kind, lexeme, self.line)
    }

    fn lexeme(&self, start: usize) -> String {
        byte_string(self.source[start..self.pos].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_ok(source: &str) -> Vec<Token> {
        let mut diags = Diagnostics::new();
        let tokens = scan(source.as_bytes(), &mut diags);
        assert!(
            !diags.has_errors(),
            "unexpected diagnostics for {:?}: {:?}",
            source,
            diags.errors()
        );
        tokens
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_individual_tokens() {
        let tests = [
            ("=", TokenKind::Assign),
            ("+", TokenKind::Plus),
            ("-", TokenKind::Minus),
            ("!", TokenKind::Bang),
            ("*", TokenKind::Asterisk),
            ("/", TokenKind::Slash),
            ("%", TokenKind::Modulo),
            ("<", TokenKind::Lt),
            ("<=", TokenKind::LtEq),
            (">", TokenKind::Gt),
            (">=", TokenKind::GtEq),
            ("==", TokenKind::Eq),
            ("!=", TokenKind::NotEq),
            ("&&", TokenKind::And),
            ("||", TokenKind::Or),
            ("++", TokenKind::PlusPlus),
            ("--", TokenKind::MinusMinus),
            ("+=", TokenKind::PlusEq),
            ("-=", TokenKind::MinusEq),
            ("*=", TokenKind::AsteriskEq),
            ("/=", TokenKind::SlashEq),
            ("%=", TokenKind::ModuloEq),
            (",", TokenKind::Comma),
            (":", TokenKind::Colon),
            (";", TokenKind::Semicolon),
            (".", TokenKind::Dot),
            ("(", TokenKind::LParen),
            (")", TokenKind::RParen),
            ("{", TokenKind::LBrace),
            ("}", TokenKind::RBrace),
            ("[", TokenKind::LBracket),
            ("]", TokenKind::RBracket),
            ("1", TokenKind::Number),
            ("12", TokenKind::Number),
            ("091283", TokenKind::Number),
            ("abc", TokenKind::Identifier),
            ("abc2", TokenKind::Identifier),
            ("abc2_5", TokenKind::Identifier),
            ("var", TokenKind::Var),
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("while", TokenKind::While),
            ("for", TokenKind::For),
            ("function", TokenKind::Function),
            ("return", TokenKind::Return),
            ("true", TokenKind::True),
            ("false", TokenKind::False),
            ("struct", TokenKind::Struct),
            ("this", TokenKind::This),
            // `print` is a builtin name, not a keyword
            ("print", TokenKind::Identifier),
        ];

        for (input, expected) in tests {
            let tokens = scan_ok(input);
            assert_eq!(tokens.len(), 2, "input: {}", input);
            assert_eq!(tokens[0].kind, expected, "input: {}", input);
            assert_eq!(tokens[0].lexeme, input, "input: {}", input);
            assert_eq!(tokens[1].kind, TokenKind::Eof, "input: {}", input);
        }
    }

    #[test]
    fn test_multiple_tokens() {
        let tokens = scan_ok("var a = 11; print(a);");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Identifier,
                TokenKind::LParen,
                TokenKind::Identifier,
                TokenKind::RParen,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_char_operators_win_over_single() {
        let tokens = scan_ok("a += 1 <= 2 == 3");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Identifier,
                TokenKind::PlusEq,
                TokenKind::Number,
                TokenKind::LtEq,
                TokenKind::Number,
                TokenKind::Eq,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_literal_is_unquoted_interior() {
        let tokens = scan_ok("\"Hello World\"");
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].lexeme, "Hello World");
    }

    #[test]
    fn test_string_bytes_round_trip_unchanged() {
        let mut diags = Diagnostics::new();
        let tokens = scan(b"\"\xC3\xA9\xFF\"", &mut diags);
        assert!(!diags.has_errors());
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].lexeme.as_bytes(), [0xC3, 0xA9, 0xFF]);
    }

    #[test]
    fn test_unterminated_string_reports_error() {
        let mut diags = Diagnostics::new();
        let tokens = scan(b"\"abc", &mut diags);
        assert!(diags.has_errors());
        // Only the Eof token survives
        assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_lone_ampersand_reports_error_and_continues() {
        let mut diags = Diagnostics::new();
        let tokens = scan(b"1 & 2", &mut diags);
        assert_eq!(diags.errors().len(), 1);
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn test_line_numbers_advance_on_newline() {
        let tokens = scan_ok("var a = 1;\nvar b = 2;\n\nvar c = 3;");
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert!(lines.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(lines.iter().all(|&line| line >= 1));
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[5].line, 2);
        assert_eq!(tokens[10].line, 4);
    }

    #[test]
    fn test_comments_are_discarded() {
        let tokens = scan_ok("// heading\nvar a = 1; // trailing\n");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn test_unexpected_byte_is_skipped() {
        let mut diags = Diagnostics::new();
        let tokens = scan(b"1 # 2", &mut diags);
        assert_eq!(diags.errors().len(), 1);
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]
        );
    }
}
