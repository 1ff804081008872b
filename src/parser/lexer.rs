// Copyright 2026 Jobfilter Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Filter Lexer (Tokenizer)
//!
//! This module provides the lexer for tokenizing filter strings.
//!
//! Two context rules matter here:
//!
//! - `NOT` followed by `IN` joins into a single `NOT IN` operator token
//!   (greedy lookahead).
//! - A `(` directly after an operator token starts a *value list* and is
//!   lexed into one [`Literal::List`] token; a `(` in operand position is a
//!   grouping parenthesis.

use super::error::LexError;
use super::token::{
    is_keyword_operator, is_operator_char, Literal, Position, Token, TokenKind,
};

/// Filter lexer for tokenizing input
pub struct Lexer {
    /// Input string
    input: Vec<char>,
    /// Current position in input (points to current char)
    position: usize,
    /// Current reading position in input (after current char)
    read_position: usize,
    /// Current character under examination
    ch: char,
    /// Current position tracking
    pos: Position,
    /// Grouping parenthesis depth
    depth: i32,
    /// Whether the previously emitted token was an operator
    after_operator: bool,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let mut lexer = Self {
            input: chars,
            position: 0,
            read_position: 0,
            ch: '\0',
            pos: Position::new(0, 1, 1),
            depth: 0,
            after_operator: false,
        };
        lexer.read_char();
        lexer
    }

    /// Read the next character
    fn read_char(&mut self) {
        if self.ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else if self.ch != '\0' {
            self.pos.column += 1;
        }

        if self.read_position >= self.input.len() {
            self.ch = '\0'; // EOF
        } else {
            self.ch = self.input[self.read_position];
            self.position = self.read_position;
            self.read_position += 1;
        }

        self.pos.offset = self.position;
    }

    /// Peek at the next character without advancing
    fn peek_char(&self) -> char {
        if self.read_position >= self.input.len() {
            '\0'
        } else {
            self.input[self.read_position]
        }
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while self.ch.is_whitespace() {
            self.read_char();
        }
    }

    /// Get the next token, or `None` at end of input
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let pos = self.pos;

        let kind = match self.ch {
            '\0' => return Ok(None),

            // String literal
            '\'' | '"' => {
                let literal = self.read_quoted(self.ch)?;
                TokenKind::Literal(Literal::Quoted(literal))
            }

            // Value list after an operator, grouping parenthesis otherwise
            '(' => {
                if self.after_operator {
                    let items = self.read_value_list()?;
                    TokenKind::Literal(Literal::List(items))
                } else {
                    self.depth += 1;
                    self.read_char();
                    TokenKind::LParen
                }
            }

            ')' => {
                self.depth -= 1;
                if self.depth < 0 {
                    return Err(LexError::UnbalancedParentheses { position: pos });
                }
                self.read_char();
                TokenKind::RParen
            }

            ',' => {
                self.read_char();
                TokenKind::Comma
            }

            // Number literal, optionally signed
            c if c.is_ascii_digit() => TokenKind::Literal(Literal::Number(self.read_number())),
            c if (c == '-' || c == '+') && self.peek_char().is_ascii_digit() => {
                TokenKind::Literal(Literal::Number(self.read_number()))
            }

            // Symbolic operator
            c if is_operator_char(c) => TokenKind::Operator(self.read_operator()),

            // Identifier, logical keyword, or keyword operator
            c if c.is_alphabetic() || c == '_' => {
                let word = self.read_identifier();
                match word.as_str() {
                    "AND" => TokenKind::And,
                    "OR" => TokenKind::Or,
                    "NOT" if self.lookahead_in() => TokenKind::Operator("NOT IN".to_string()),
                    _ if is_keyword_operator(&word) => TokenKind::Operator(word),
                    _ => TokenKind::Ident(word),
                }
            }

            // Stray characters surface as unknown operators at parse time
            c => {
                self.read_char();
                TokenKind::Operator(c.to_string())
            }
        };

        self.after_operator = matches!(kind, TokenKind::Operator(_));
        Ok(Some(Token::new(kind, pos)))
    }

    /// Check the grouping parenthesis balance at end of input
    pub fn check_balanced(&self) -> Result<(), LexError> {
        if self.depth != 0 {
            return Err(LexError::UnbalancedParentheses { position: self.pos });
        }
        Ok(())
    }

    /// Read an identifier
    ///
    /// A `:` continues an identifier, so `attribute:salary` is one token.
    /// A `-` continues one too, for bare values like `full-time`.
    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        result.push(self.ch);
        self.read_char();

        while self.ch.is_alphanumeric() || matches!(self.ch, '_' | ':' | '-') {
            result.push(self.ch);
            self.read_char();
        }

        result
    }

    /// Greedy lookahead after `NOT`: does `IN` follow?
    fn lookahead_in(&mut self) -> bool {
        let saved_position = self.position;
        let saved_read_position = self.read_position;
        let saved_ch = self.ch;
        let saved_pos = self.pos;

        self.skip_whitespace();
        let mut word = String::new();
        while self.ch.is_alphanumeric() || self.ch == '_' {
            word.push(self.ch);
            self.read_char();
        }

        if word == "IN" {
            true
        } else {
            self.position = saved_position;
            self.read_position = saved_read_position;
            self.ch = saved_ch;
            self.pos = saved_pos;
            false
        }
    }

    /// Read a number (optional sign, digits, optional single decimal point)
    fn read_number(&mut self) -> String {
        let mut result = String::new();
        result.push(self.ch);
        self.read_char();

        while self.ch.is_ascii_digit() {
            result.push(self.ch);
            self.read_char();
        }

        if self.ch == '.' && self.peek_char().is_ascii_digit() {
            result.push(self.ch);
            self.read_char();

            while self.ch.is_ascii_digit() {
                result.push(self.ch);
                self.read_char();
            }
        }

        result
    }

    /// Read a quoted literal, stripping the quotes
    ///
    /// The grammar has no escape sequences: a quote character cannot appear
    /// inside a literal quoted with the same character.
    fn read_quoted(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.pos;
        let mut result = String::new();
        self.read_char(); // consume opening quote

        loop {
            if self.ch == '\0' {
                return Err(LexError::UnterminatedString { position: start });
            }
            if self.ch == quote {
                self.read_char();
                return Ok(result);
            }
            result.push(self.ch);
            self.read_char();
        }
    }

    /// Read a symbolic operator: the full run of operator characters
    ///
    /// A run the grammar doesn't know (`===`, `=!`) stays one token, so
    /// it surfaces as an unknown operator rather than a pair of valid
    /// ones followed by a confusing syntax error.
    fn read_operator(&mut self) -> String {
        let mut result = String::new();
        while is_operator_char(self.ch) {
            result.push(self.ch);
            self.read_char();
        }
        result
    }

    /// Read a parenthesized comma list into its elements
    ///
    /// Called with the cursor on `(`. Lists do not nest; bare elements may
    /// contain spaces (`(New York, Dubai)`) and are trimmed.
    fn read_value_list(&mut self) -> Result<Vec<Literal>, LexError> {
        let start = self.pos;
        let mut items = Vec::new();
        self.read_char(); // consume '('

        loop {
            self.skip_whitespace();

            match self.ch {
                '\0' => return Err(LexError::UnbalancedParentheses { position: start }),
                ')' => {
                    self.read_char();
                    return Ok(items);
                }
                ',' => {
                    self.read_char();
                }
                '\'' | '"' => {
                    let literal = self.read_quoted(self.ch)?;
                    items.push(Literal::Quoted(literal));
                }
                _ => {
                    let mut word = String::new();
                    while !matches!(self.ch, ',' | ')' | '\0') {
                        word.push(self.ch);
                        self.read_char();
                    }
                    let word = word.trim().to_string();
                    if !word.is_empty() {
                        items.push(Literal::Word(word));
                    }
                }
            }
        }
    }
}

/// Tokenize a filter string
///
/// Returns the full token stream, or the first lexical error encountered.
/// Empty and whitespace-only input yields an empty stream.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }

    lexer.check_balanced()?;
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .expect("tokenize failed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_condition() {
        let tokens = kinds("job_type = full-time");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident("job_type".to_string()),
                TokenKind::Operator("=".to_string()),
                TokenKind::Ident("full-time".to_string()),
            ]
        );
    }

    #[test]
    fn test_logical_keywords_case_sensitive() {
        let tokens = kinds("a = 1 AND b = 2 OR c = 3");
        assert!(tokens.contains(&TokenKind::And));
        assert!(tokens.contains(&TokenKind::Or));

        // Lowercase "and" is just an identifier
        let tokens = kinds("a = 1 and b = 2");
        assert!(!tokens.contains(&TokenKind::And));
        assert!(tokens.contains(&TokenKind::Ident("and".to_string())));
    }

    #[test]
    fn test_numbers() {
        let tokens = kinds("salary_min >= 50000.5");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident("salary_min".to_string()),
                TokenKind::Operator(">=".to_string()),
                TokenKind::Literal(Literal::Number("50000.5".to_string())),
            ]
        );
    }

    #[test]
    fn test_operator_run_stays_one_token() {
        let tokens = kinds("a === 1");
        assert_eq!(tokens[1], TokenKind::Operator("===".to_string()));

        let tokens = kinds("a =! 1");
        assert_eq!(tokens[1], TokenKind::Operator("=!".to_string()));
    }

    #[test]
    fn test_quoted_strings() {
        let tokens = kinds("title LIKE 'Software Engineer'");
        assert_eq!(
            tokens[2],
            TokenKind::Literal(Literal::Quoted("Software Engineer".to_string()))
        );

        let tokens = kinds("city = \"New York\"");
        assert_eq!(
            tokens[2],
            TokenKind::Literal(Literal::Quoted("New York".to_string()))
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("title = 'abc").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }

    #[test]
    fn test_not_in_lookahead() {
        let tokens = kinds("status NOT IN (draft, archived)");
        assert_eq!(tokens[1], TokenKind::Operator("NOT IN".to_string()));

        // NOT without IN stays an identifier
        let tokens = kinds("NOT");
        assert_eq!(tokens[0], TokenKind::Ident("NOT".to_string()));
    }

    #[test]
    fn test_attribute_prefix_is_one_ident() {
        let tokens = kinds("attribute:years_experience >= 3");
        assert_eq!(
            tokens[0],
            TokenKind::Ident("attribute:years_experience".to_string())
        );
    }

    #[test]
    fn test_list_after_operator() {
        let tokens = kinds("languages HAS_ANY (PHP, 'Ruby on Rails', 42)");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident("languages".to_string()),
                TokenKind::Operator("HAS_ANY".to_string()),
                TokenKind::Literal(Literal::List(vec![
                    Literal::Word("PHP".to_string()),
                    Literal::Quoted("Ruby on Rails".to_string()),
                    Literal::Word("42".to_string()),
                ])),
            ]
        );
    }

    #[test]
    fn test_bare_list_elements_keep_inner_spaces() {
        let tokens = kinds("locations IS_ANY (New York, Remote)");
        assert_eq!(
            tokens[2],
            TokenKind::Literal(Literal::List(vec![
                Literal::Word("New York".to_string()),
                Literal::Word("Remote".to_string()),
            ]))
        );
    }

    #[test]
    fn test_group_paren_in_operand_position() {
        let tokens = kinds("(a = 1 AND b = 2) OR c = 3");
        assert_eq!(tokens[0], TokenKind::LParen);
        assert_eq!(tokens[8], TokenKind::RParen);
        assert_eq!(tokens[9], TokenKind::Or);
    }

    #[test]
    fn test_unbalanced_open() {
        let err = tokenize("(a = 1").unwrap_err();
        assert!(matches!(err, LexError::UnbalancedParentheses { .. }));
    }

    #[test]
    fn test_unbalanced_close() {
        let err = tokenize("a = 1)").unwrap_err();
        assert!(matches!(err, LexError::UnbalancedParentheses { .. }));
    }

    #[test]
    fn test_unterminated_list() {
        let err = tokenize("languages IN (PHP, Go").unwrap_err();
        assert!(matches!(err, LexError::UnbalancedParentheses { .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   \n\t ").unwrap().is_empty());
    }

    #[test]
    fn test_position_tracking() {
        let tokens = tokenize("a = 1\nb = 2").unwrap();
        assert_eq!(tokens[0].position.line, 1);
        assert_eq!(tokens[0].position.column, 1);
        assert_eq!(tokens[3].position.line, 2);
        assert_eq!(tokens[3].position.column, 1);
    }

    #[test]
    fn test_stray_char_becomes_operator() {
        let tokens = kinds("a @ 1");
        assert_eq!(tokens[1], TokenKind::Operator("@".to_string()));
    }

    #[test]
    fn test_operators_without_spaces() {
        let tokens = kinds("salary_max<=9000");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident("salary_max".to_string()),
                TokenKind::Operator("<=".to_string()),
                TokenKind::Literal(Literal::Number("9000".to_string())),
            ]
        );
    }
}
