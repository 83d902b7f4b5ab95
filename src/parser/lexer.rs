//! Whitespace lexer for command lines
//!
//! Splits a (possibly incomplete) command line into word tokens with byte
//! spans. Like the rest of the completion path it never fails:
//!
//! - whitespace separates words
//! - single and double quotes group whitespace into one word and are stripped
//! - an unterminated quote runs to the end of the input

use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;

/// A single word of the command line
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Word text with quotes removed
    pub text: String,
    /// Byte range of the word in the original input, quotes included
    pub span: Range<usize>,
}

impl Token {
    /// Create a new token
    pub fn new(text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

/// Output of a lexer run
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
    /// Words in input order
    pub tokens: Vec<Token>,
    /// True when the input is empty or ends in an unquoted separator
    pub at_separator: bool,
}

/// Error-tolerant word lexer
pub struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `input`
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
        }
    }

    /// Tokenize the whole input
    pub fn tokenize(input: &str) -> Lexed {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token() {
            tokens.push(token);
        }

        // A word that stops short of the end of input was followed by whitespace.
        let at_separator = tokens
            .last()
            .is_none_or(|token| token.span.end < input.len());

        Lexed {
            tokens,
            at_separator,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, ch)| ch.is_whitespace()).is_some() {}
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();
        let &(start, _) = self.chars.peek()?;

        let mut text = String::new();
        let mut end = start;
        let mut quote: Option<char> = None;

        while let Some(&(idx, ch)) = self.chars.peek() {
            match quote {
                Some(open) if ch == open => quote = None,
                Some(_) => text.push(ch),
                None if ch.is_whitespace() => break,
                None if ch == '"' || ch == '\'' => quote = Some(ch),
                None => text.push(ch),
            }
            end = idx + ch.len_utf8();
            self.chars.next();
        }

        Some(Token::new(text, start..end))
    }
}
