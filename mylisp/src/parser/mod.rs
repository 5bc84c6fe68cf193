//! Parser implementation using lalrpop

use crate::ast::{Node, Span};
use crate::error::{CompileError, Result};
use crate::lexer::{Token, tokenize};

#[cfg(test)]
mod tests;

lalrpop_util::lalrpop_mod!(
    #[allow(clippy::all)]
    grammar
);

/// Parse tokens into a parse tree rooted at a `Root` node
pub fn parse(_filename: &str, source: &str, tokens: Vec<(Token, Span)>) -> Result<Node> {
    let token_iter = tokens
        .into_iter()
        .map(|(tok, span)| (span.start, tok, span.end));

    // Keep the reported span inside the source so the report can point at it
    let clamp = |location: usize| Span::new(location.min(source.len()), (location + 1).min(source.len()));

    grammar::ProgramParser::new()
        .parse(token_iter)
        .map_err(|e| {
            let span = match &e {
                lalrpop_util::ParseError::InvalidToken { location } => clamp(*location),
                lalrpop_util::ParseError::UnrecognizedEof { location, .. } => clamp(*location),
                lalrpop_util::ParseError::UnrecognizedToken { token, .. } => {
                    Span::new(token.0, token.2)
                }
                lalrpop_util::ParseError::ExtraToken { token } => Span::new(token.0, token.2),
                lalrpop_util::ParseError::User { .. } => Span::new(0, 0),
            };
            CompileError::parser(format!("{e}"), span)
        })
}

/// Tokenize and parse a source line
pub fn parse_source(filename: &str, source: &str) -> Result<Node> {
    let tokens = tokenize(source)?;
    parse(filename, source, tokens)
}
