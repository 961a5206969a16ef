use crate::condition::Condition;
use crate::lexer;
use crate::lexer::TokenStream;
use crate::lexer::END_OF_INPUT;
use crate::span::Span;

mod errors;

pub use errors::ErrorKind;
pub use errors::Found;
pub use errors::SyntaxError;

#[cfg(test)]
mod test_errors;

/// A BL statement. Bodies of `If`, `IfElse` and `While` are always `Block`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Block(Vec<Statement>),
    If {
        condition: Condition,
        body: Box<Statement>,
    },
    IfElse {
        condition: Condition,
        then_body: Box<Statement>,
        else_body: Box<Statement>,
    },
    While {
        condition: Condition,
        body: Box<Statement>,
    },
    Call {
        name: String,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    Block,
    If,
    IfElse,
    While,
    Call,
}

impl Default for Statement {
    fn default() -> Self {
        Statement::Block(Vec::new())
    }
}

impl Statement {
    /// A fresh, empty block to parse or assemble into.
    pub fn new_instance() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> Kind {
        match self {
            Statement::Block(_) => Kind::Block,
            Statement::If { .. } => Kind::If,
            Statement::IfElse { .. } => Kind::IfElse,
            Statement::While { .. } => Kind::While,
            Statement::Call { .. } => Kind::Call,
        }
    }

    pub fn is_empty_block(&self) -> bool {
        matches!(self, Statement::Block(children) if children.is_empty())
    }

    pub fn length_of_block(&self) -> usize {
        match self {
            Statement::Block(children) => children.len(),
            other => panic!("length_of_block on a {:?} statement", other.kind()),
        }
    }

    /// Places `statement` at `index` of this block. `index` may be at most the block's length,
    /// and `statement` must not itself be a block.
    pub fn add_to_block(&mut self, index: usize, statement: Statement) {
        debug_assert_ne!(Kind::Block, statement.kind(), "blocks cannot be nested directly");
        match self {
            Statement::Block(children) => {
                debug_assert!(index <= children.len(), "block index {index} out of bounds");
                children.insert(index, statement);
            }
            other => panic!("add_to_block on a {:?} statement", other.kind()),
        }
    }

    pub fn assemble_if(&mut self, condition: Condition, body: Statement) {
        debug_assert!(self.is_empty_block(), "assembling into a non-empty statement");
        debug_assert_eq!(Kind::Block, body.kind());
        *self = Statement::If {
            condition,
            body: Box::new(body),
        };
    }

    pub fn assemble_if_else(
        &mut self,
        condition: Condition,
        then_body: Statement,
        else_body: Statement,
    ) {
        debug_assert!(self.is_empty_block(), "assembling into a non-empty statement");
        debug_assert_eq!(Kind::Block, then_body.kind());
        debug_assert_eq!(Kind::Block, else_body.kind());
        *self = Statement::IfElse {
            condition,
            then_body: Box::new(then_body),
            else_body: Box::new(else_body),
        };
    }

    pub fn assemble_while(&mut self, condition: Condition, body: Statement) {
        debug_assert!(self.is_empty_block(), "assembling into a non-empty statement");
        debug_assert_eq!(Kind::Block, body.kind());
        *self = Statement::While {
            condition,
            body: Box::new(body),
        };
    }

    pub fn assemble_call(&mut self, name: impl Into<String>) {
        debug_assert!(self.is_empty_block(), "assembling into a non-empty statement");
        *self = Statement::Call { name: name.into() };
    }

    /// Parses exactly one statement (`IF`, `WHILE` or a call) off the front of `tokens`.
    pub fn parse(tokens: &mut TokenStream) -> Result<Statement, SyntaxError> {
        parse_at(tokens, 0)
    }

    /// Parses statements into a block until the front of `tokens` is `END`, `ELSE` or the end
    /// of input. The terminator is left in place for the caller.
    pub fn parse_block(tokens: &mut TokenStream) -> Result<Statement, SyntaxError> {
        parse_block_at(tokens, 0)
    }
}

/// How many `IF`/`WHILE` statements may enclose one another.
pub const MAX_NESTING: usize = 256;

// `depth` is the number of enclosing IF/WHILE statements
fn parse_at(tokens: &mut TokenStream, depth: usize) -> Result<Statement, SyntaxError> {
    let front = tokens.front();
    tracing::trace!(token = %front, depth, "parsing statement");
    let compound = front.inner == "IF" || front.inner == "WHILE";
    if compound && depth >= MAX_NESTING {
        return Err(SyntaxError::NestingTooDeep {
            limit: MAX_NESTING,
            found: front.into(),
            span: front.span,
        });
    }

    if front.inner == "IF" {
        parse_if(tokens, depth + 1)
    } else if front.inner == "WHILE" {
        parse_while(tokens, depth + 1)
    } else if lexer::is_identifier(front) {
        Ok(parse_call(tokens))
    } else {
        Err(SyntaxError::InvalidStatementStart {
            found: front.into(),
            span: front.span,
        })
    }
}

fn parse_block_at(tokens: &mut TokenStream, depth: usize) -> Result<Statement, SyntaxError> {
    let mut block = Statement::new_instance();
    while !is_block_terminator(tokens.front()) {
        let statement = parse_at(tokens, depth)?;
        block.add_to_block(block.length_of_block(), statement);
    }
    tracing::trace!(statements = block.length_of_block(), "closed block");
    Ok(block)
}

fn is_block_terminator(token: &Span<String>) -> bool {
    matches!(token.inner.as_str(), "END" | "ELSE" | END_OF_INPUT)
}

/// Dequeues the front token if it is `keyword`.
fn expect_keyword(tokens: &mut TokenStream, keyword: &'static str) -> Result<(), SyntaxError> {
    if !tokens.front_is(keyword) {
        return Err(SyntaxError::unexpected(keyword, tokens.front()));
    }
    tokens.dequeue();
    Ok(())
}

/// Dequeues and translates the condition following `construct`.
fn expect_condition(
    tokens: &mut TokenStream,
    construct: &'static str,
) -> Result<Condition, SyntaxError> {
    let front = tokens.front();
    if !lexer::is_condition(front) {
        return Err(SyntaxError::InvalidCondition {
            construct,
            found: front.into(),
            span: front.span,
        });
    }
    let token = tokens.dequeue();
    Condition::translate(&token).map_err(|_| SyntaxError::UnknownCondition {
        found: (&token).into(),
        span: token.span,
    })
}

// IF condition THEN block [ELSE block] END IF
fn parse_if(tokens: &mut TokenStream, depth: usize) -> Result<Statement, SyntaxError> {
    debug_assert!(tokens.front_is("IF"));
    tokens.dequeue();

    let condition = expect_condition(tokens, "IF")?;
    expect_keyword(tokens, "THEN")?;
    let then_body = parse_block_at(tokens, depth)?;

    let mut s = Statement::new_instance();
    if tokens.front_is("ELSE") {
        tokens.dequeue();
        let else_body = parse_block_at(tokens, depth)?;
        s.assemble_if_else(condition, then_body, else_body);
    } else if tokens.front_is("END") {
        s.assemble_if(condition, then_body);
    } else {
        return Err(SyntaxError::unexpected("ELSE or END", tokens.front()));
    }

    expect_keyword(tokens, "END")?;
    expect_keyword(tokens, "IF")?;
    Ok(s)
}

// WHILE condition DO block END WHILE
fn parse_while(tokens: &mut TokenStream, depth: usize) -> Result<Statement, SyntaxError> {
    debug_assert!(tokens.front_is("WHILE"));
    tokens.dequeue();

    let condition = expect_condition(tokens, "WHILE")?;
    expect_keyword(tokens, "DO")?;
    let body = parse_block_at(tokens, depth)?;

    let mut s = Statement::new_instance();
    s.assemble_while(condition, body);

    expect_keyword(tokens, "END")?;
    expect_keyword(tokens, "WHILE")?;
    Ok(s)
}

fn parse_call(tokens: &mut TokenStream) -> Statement {
    debug_assert!(lexer::is_identifier(tokens.front()));
    let name = tokens.dequeue();

    let mut s = Statement::new_instance();
    s.assemble_call(name.inner);
    s
}

fn expect_end_of_input(tokens: &TokenStream) -> Result<(), SyntaxError> {
    if tokens.at_end() {
        Ok(())
    } else {
        let front = tokens.front();
        Err(SyntaxError::ExtraToken {
            found: front.into(),
            span: front.span,
        })
    }
}

/// Parses a whole token stream as one block. Fails if anything besides `END_OF_INPUT` remains.
#[tracing::instrument(skip_all, fields(token_count = tokens.token_count()))]
pub fn parse(mut tokens: TokenStream) -> Result<Statement, SyntaxError> {
    let block = parse_block_at(&mut tokens, 0)?;
    expect_end_of_input(&tokens)?;
    tracing::debug!(statements = block.length_of_block(), "parsed block");
    Ok(block)
}

/// Parses a whole token stream as a single statement.
#[tracing::instrument(skip_all, fields(token_count = tokens.token_count()))]
pub fn parse_statement(mut tokens: TokenStream) -> Result<Statement, SyntaxError> {
    let statement = parse_at(&mut tokens, 0)?;
    expect_end_of_input(&tokens)?;
    tracing::debug!(kind = ?statement.kind(), "parsed statement");
    Ok(statement)
}
