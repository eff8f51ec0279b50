use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("begin", TokenKind::Begin);
        map.insert("end", TokenKind::End);
        map.insert("const", TokenKind::Const);
        map.insert("var", TokenKind::Var);
        map.insert("proc", TokenKind::Proc);
        map.insert("call", TokenKind::Call);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("read", TokenKind::Read);
        map.insert("print", TokenKind::Print);
        map.insert("divisible", TokenKind::Divisible);
        map.insert("by", TokenKind::By);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,

    OpenParen,
    CloseParen,

    Becomes,       // :=
    Equals,        // =
    EqEq,          // ==
    NotEquals,     // !=
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Period,
    Semicolon,
    Comma,

    Plus,
    Dash,
    Star,
    Slash,

    // Reserved
    Begin,
    End,
    Const,
    Var,
    Proc,
    Call,
    If,
    Then,
    Else,
    While,
    Do,
    Read,
    Print,
    Divisible,
    By,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}
