use crate::{
    ast::{
        ast::{Block, ConstDecl, ConstDef, Ident, ProcDecl, VarDecl},
        expressions::{Condition, DivisibleCondition, RelOp, RelOpCondition},
        statements::{AssignStmt, BlockStmt, CallStmt, IfStmt, PrintStmt, ReadStmt, Stmt, WhileStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

/// `begin {const-decl} {var-decl} {proc-decl} stmts end`
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let start = parser.expect_with(TokenKind::Begin, "expected `begin` to open a block")?.span.start;

    let mut const_decls = vec![];
    while parser.current_token_kind() == TokenKind::Const {
        const_decls.push(parse_const_decl(parser)?);
    }

    let mut var_decls = vec![];
    while parser.current_token_kind() == TokenKind::Var {
        var_decls.push(parse_var_decl(parser)?);
    }

    let mut proc_decls = vec![];
    while parser.current_token_kind() == TokenKind::Proc {
        proc_decls.push(parse_proc_decl(parser)?);
    }

    let stmts = parse_stmts(parser)?;

    parser.expect_with(TokenKind::End, "expected `end` to close the block")?;

    Ok(Block {
        const_decls,
        var_decls,
        proc_decls,
        stmts,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

fn parse_ident(parser: &mut Parser, message: &str) -> Result<Ident, Error> {
    let token = parser.expect_with(TokenKind::Identifier, message)?;
    Ok(Ident::new(token.value, token.span))
}

pub fn parse_const_decl(parser: &mut Parser) -> Result<ConstDecl, Error> {
    let start = parser.advance().span.start;

    let mut defs = vec![parse_const_def(parser)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        defs.push(parse_const_def(parser)?);
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(ConstDecl {
        defs,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

/// `ident = [+|-] number`
fn parse_const_def(parser: &mut Parser) -> Result<ConstDef, Error> {
    let name = parse_ident(parser, "expected identifier in constant definition")?;

    parser.expect_with(TokenKind::Equals, "expected `=` in constant definition")?;

    let negative = match parser.current_token_kind() {
        TokenKind::Dash => {
            parser.advance();
            true
        }
        TokenKind::Plus => {
            parser.advance();
            false
        }
        _ => false,
    };

    let token = parser.expect_with(TokenKind::Number, "expected a number in constant definition")?;

    // Parsed wide so that the most negative word is still accepted
    let value = token
        .value
        .parse::<i64>()
        .ok()
        .map(|value| if negative { -value } else { value })
        .and_then(|value| i32::try_from(value).ok())
        .ok_or_else(|| {
            Error::new(ErrorImpl::NumberParseError { token: token.value.clone() }, token.span.start.clone())
        })?;

    Ok(ConstDef {
        span: Span {
            start: name.span.start.clone(),
            end: token.span.end,
        },
        name,
        value,
    })
}

pub fn parse_var_decl(parser: &mut Parser) -> Result<VarDecl, Error> {
    let start = parser.advance().span.start;

    let mut names = vec![parse_ident(parser, "expected identifier during variable declaration")?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        names.push(parse_ident(parser, "expected identifier during variable declaration")?);
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(VarDecl {
        names,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

pub fn parse_proc_decl(parser: &mut Parser) -> Result<ProcDecl, Error> {
    let start = parser.advance().span.start;

    let name = parse_ident(parser, "expected procedure name")?;
    let block = parse_block(parser)?;

    parser.expect_with(TokenKind::Semicolon, "expected `;` after procedure body")?;

    Ok(ProcDecl {
        name,
        block,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

/// `[stmt {; stmt}]`, empty when the enclosing construct closes immediately.
pub fn parse_stmts(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let mut stmts = vec![];

    if matches!(parser.current_token_kind(), TokenKind::End | TokenKind::Else) {
        return Ok(stmts);
    }

    stmts.push(parse_stmt(parser)?);
    while parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
        stmts.push(parse_stmt(parser)?);
    }

    Ok(stmts)
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    match parser.get_stmt_lookup().get(&parser.current_token_kind()) {
        Some(handler) => {
            let handler = *handler;
            handler(parser)
        }
        None => Err(parser.unexpected("expected a statement")),
    }
}

pub fn parse_assign_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let name = parse_ident(parser, "expected identifier")?;

    parser.expect_with(TokenKind::Becomes, "expected `:=` in assignment")?;

    let expr = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Assign(AssignStmt {
        span: Span {
            start: name.span.start.clone(),
            end: expr.get_span().end.clone(),
        },
        name,
        expr,
    }))
}

pub fn parse_call_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let name = parse_ident(parser, "expected procedure name after `call`")?;

    Ok(Stmt::Call(CallStmt {
        span: Span {
            start,
            end: name.span.end.clone(),
        },
        name,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let condition = parse_condition(parser)?;

    parser.expect_with(TokenKind::Then, "expected `then` after condition")?;

    let then_stmts = parse_stmts(parser)?;

    let else_stmts = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_stmts(parser)?)
    } else {
        None
    };

    parser.expect_with(TokenKind::End, "expected `end` to close the if statement")?;

    Ok(Stmt::If(IfStmt {
        condition,
        then_stmts,
        else_stmts,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let condition = parse_condition(parser)?;

    parser.expect_with(TokenKind::Do, "expected `do` after condition")?;

    let body = parse_stmts(parser)?;

    parser.expect_with(TokenKind::End, "expected `end` to close the while statement")?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_read_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let name = parse_ident(parser, "expected identifier after `read`")?;

    Ok(Stmt::Read(ReadStmt {
        span: Span {
            start,
            end: name.span.end.clone(),
        },
        name,
    }))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let expr = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Print(PrintStmt {
        span: Span {
            start,
            end: expr.get_span().end.clone(),
        },
        expr,
    }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let block = parse_block(parser)?;

    Ok(Stmt::Block(BlockStmt {
        span: block.span.clone(),
        block,
    }))
}

/// `divisible e by e` or `e rel-op e`
pub fn parse_condition(parser: &mut Parser) -> Result<Condition, Error> {
    if parser.current_token_kind() == TokenKind::Divisible {
        let start = parser.advance().span.start;
        let dividend = parse_expr(parser, BindingPower::Default)?;

        parser.expect_with(TokenKind::By, "expected `by` in divisibility condition")?;

        let divisor = parse_expr(parser, BindingPower::Default)?;

        return Ok(Condition::Divisible(DivisibleCondition {
            span: Span {
                start,
                end: divisor.get_span().end.clone(),
            },
            dividend,
            divisor,
        }));
    }

    let left = parse_expr(parser, BindingPower::Default)?;

    let operator = match parser.current_token_kind() {
        TokenKind::EqEq => RelOp::Eq,
        TokenKind::NotEquals => RelOp::Ne,
        TokenKind::Less => RelOp::Lt,
        TokenKind::LessEquals => RelOp::Le,
        TokenKind::Greater => RelOp::Gt,
        TokenKind::GreaterEquals => RelOp::Ge,
        _ => return Err(parser.unexpected("expected a relational operator")),
    };
    parser.advance();

    let right = parse_expr(parser, BindingPower::Default)?;

    Ok(Condition::RelOp(RelOpCondition {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left,
        operator,
        right,
    }))
}
