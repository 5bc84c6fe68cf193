//! Token definitions

use logos::Logos;
use std::fmt;

/// MyLisp token
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // Kept as text: range checking belongs to the reader
    #[regex(r"-?[0-9]+", |lex| lex.slice().to_string())]
    Number(String),

    /// Symbols never start where a number could, so `2-3` is two numbers and
    /// `1+` is a number followed by `+`
    #[regex(
        r"[a-zA-Z_+*/\\=<>!&%^][a-zA-Z0-9_+\-*/\\=<>!&%^]*|-([a-zA-Z_+\-*/\\=<>!&%^][a-zA-Z0-9_+\-*/\\=<>!&%^]*)?",
        |lex| lex.slice().to_string()
    )]
    Symbol(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Number(text) | Token::Symbol(text) => write!(f, "{text}"),
        }
    }
}
