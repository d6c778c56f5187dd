//! Syntax tree provider - turns a script into parsed statements

use sqlparser::ast::Statement;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Location, Token, Tokenizer};

use crate::dialect::ParseOptions;
use crate::error::ParseFailure;

/// One parsed statement of a script
#[derive(Debug, Clone)]
pub struct ParsedStatement {
    /// Source text of the statement, without the terminator
    pub text: String,
    /// Line (1-indexed) the statement starts on
    pub line: usize,
    pub root: Statement,
}

/// Anything that can turn SQL source into statement syntax trees
pub trait SyntaxTreeProvider: Send + Sync {
    fn parse(
        &self,
        sql: &str,
        options: &ParseOptions,
    ) -> Result<Vec<ParsedStatement>, ParseFailure>;
}

/// Provider backed by sqlparser
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlParserProvider;

impl SyntaxTreeProvider for SqlParserProvider {
    fn parse(
        &self,
        sql: &str,
        options: &ParseOptions,
    ) -> Result<Vec<ParsedStatement>, ParseFailure> {
        tracing::trace!(
            dialect = %options.dialect,
            charset = options.charset.as_deref().unwrap_or("default"),
            collation = options.collation.as_deref().unwrap_or("default"),
            "parsing script"
        );

        let dialect = options.dialect.parser_dialect();
        let tokens = Tokenizer::new(dialect.as_ref(), sql)
            .tokenize_with_location()
            .map_err(|e| ParseFailure::new(e.to_string(), e.location.line as usize))?;
        let mut parser = Parser::new(dialect.as_ref()).with_tokens_with_locations(tokens);

        let mut statements = Vec::new();
        let mut cursor = Cursor::default();
        let mut expecting_terminator = false;

        loop {
            // Skip empty statements between terminators
            while parser.consume_token(&Token::SemiColon) {
                expecting_terminator = false;
            }

            let next = parser.peek_token();
            if next.token == Token::EOF {
                break;
            }

            let start = next.span.start;
            if expecting_terminator {
                return Err(ParseFailure::new(
                    format!("Expected: end of statement, found: {}", next.token),
                    start.line as usize,
                ));
            }

            let root = match parser.parse_statement() {
                Ok(stmt) => stmt,
                Err(e) => {
                    let at = parser.peek_token().span.start.line as usize;
                    let line = if at > 0 { at } else { start.line as usize };
                    return Err(ParseFailure::new(e.to_string(), line));
                }
            };

            let end = parser.peek_token().span.start;
            let text = statement_text(sql, &mut cursor, start, end);
            statements.push(ParsedStatement {
                text,
                line: start.line as usize,
                root,
            });
            expecting_terminator = true;
        }

        Ok(statements)
    }
}

/// Slice the source between two token locations
///
/// An empty `end` (line 0) means the statement runs to the end of the script.
fn statement_text(sql: &str, cursor: &mut Cursor, start: Location, end: Location) -> String {
    let from = cursor.seek(sql, start).unwrap_or(cursor.offset);
    let to = if end.line == 0 {
        sql.len()
    } else {
        cursor.seek(sql, end).unwrap_or(sql.len())
    };
    sql.get(from..to.max(from))
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Forward-only position in a script
///
/// Statement locations only grow, so each statement resumes scanning where
/// the previous one stopped.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    offset: usize,
    line: u64,
    column: u64,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Cursor {
    fn at(&self, location: Location) -> bool {
        self.line == location.line && self.column == location.column
    }

    /// Move to a 1-indexed line/column and return its byte offset
    ///
    /// Locations behind the cursor or outside the script leave it unchanged.
    fn seek(&mut self, sql: &str, location: Location) -> Option<usize> {
        if (location.line, location.column) < (self.line, self.column) {
            return None;
        }

        let mut next = *self;
        for ch in sql.get(self.offset..)?.chars() {
            if next.at(location) {
                break;
            }
            next.offset += ch.len_utf8();
            if ch == '\n' {
                next.line += 1;
                next.column = 1;
            } else {
                next.column += 1;
            }
        }

        next.at(location).then(|| {
            *self = next;
            next.offset
        })
    }
}
