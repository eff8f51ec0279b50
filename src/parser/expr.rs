use crate::{
    ast::{
        ast::Ident,
        expressions::{ArithOp, BinaryExpr, Expr, NegatedExpr, NumberExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected("expected an expression")),
    };

    let mut left = nud(parser)?;

    // While the next infix operator binds tighter than bp, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser.get_bp_lookup().get(&token_kind).unwrap_or(&BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => break,
        };
        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

/// Numbers are machine words, anything past `i32::MAX` is rejected here.
pub fn parse_number(token: &Token) -> Result<i32, Error> {
    token.value.parse::<i32>().map_err(|_| {
        Error::new(ErrorImpl::NumberParseError { token: token.value.clone() }, token.span.start.clone())
    })
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.advance();
            let value = parse_number(&token)?;
            Ok(Expr::Number(NumberExpr { value, span: token.span }))
        },
        TokenKind::Identifier => {
            let token = parser.advance();
            Ok(Expr::Ident(Ident::new(token.value, token.span)))
        },
        _ => Err(parser.unexpected("expected an identifier or a number")),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match operator_token.kind {
        TokenKind::Plus => ArithOp::Plus,
        TokenKind::Dash => ArithOp::Minus,
        TokenKind::Star => ArithOp::Times,
        TokenKind::Slash => ArithOp::Divide,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: operator_token.value },
                operator_token.span.start,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    // Unary plus is the identity and leaves no node behind
    if operator_token.kind == TokenKind::Plus {
        return Ok(rhs);
    }

    Ok(Expr::Negated(NegatedExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: rhs.get_span().end.clone(),
        },
        expr: Box::new(rhs),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;

    parser.expect_with(TokenKind::CloseParen, "expected `)` to close the parenthesised expression")?;

    Ok(expr)
}
