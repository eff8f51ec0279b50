//! Token cursor and entry point of the parser.
//!
//! Statements are dispatched on their leading keyword, expressions go through
//! a Pratt loop driven by prefix (NUD) and infix (LED) handler tables. All
//! tables are filled by `create_token_lookups` before parsing starts.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::Block,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_block,
};

pub struct Parser {
    /// Always terminated by `EOF`
    tokens: Vec<Token>,
    pos: usize,
    file: Rc<String>,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Past the end of the stream this keeps returning the final `EOF` token.
    pub fn current_token(&self) -> &Token {
        let index = self.pos.min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        match self.tokens.is_empty() {
            true => TokenKind::EOF,
            false => self.current_token().kind,
        }
    }

    /// Consumes the current token and hands it back.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consumes a token of `kind`, or fails with a generic "expected" message.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        let message = format!("expected {}", kind);
        self.expect_with(kind, &message)
    }

    /// Consumes a token of `kind`, or fails with `message` at the current token.
    pub fn expect_with(&mut self, kind: TokenKind, message: &str) -> Result<Token, Error> {
        if self.current_token_kind() != kind {
            return Err(self.unexpected(message));
        }
        Ok(self.advance())
    }

    pub fn unexpected(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().value.clone(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers an infix operator together with how tightly it binds.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a prefix handler. No binding power is recorded here, so `-`
    /// can be both a sign and a subtraction.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn get_position(&self) -> Position {
        match self.tokens.is_empty() {
            true => Position(0, Rc::clone(&self.file)),
            false => self.current_token().span.start.clone(),
        }
    }

    /// End of the last consumed token, used to close node spans.
    pub fn previous_end(&self) -> Position {
        if self.pos == 0 || self.tokens.is_empty() {
            return self.get_position();
        }
        self.tokens[(self.pos - 1).min(self.tokens.len() - 1)].span.end.clone()
    }
}

/// Parses a whole program: one block followed by `.` and nothing else.
///
/// Parsing stops at the first syntax error.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Block, Error> {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);

    let block = parse_block(&mut parser)?;

    parser.expect_with(TokenKind::Period, "expected `.` after the program block")?;
    parser.expect_with(TokenKind::EOF, "expected end of file after `.`")?;

    Ok(block)
}
