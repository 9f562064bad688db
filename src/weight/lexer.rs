//! Tokenizer for weight-law expressions

use std::ops::Range;

use logos::Logos;

/// Weight-law expression token
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r#""[^"]*""#, |lex| unquote(lex.slice()))]
    #[regex(r"'[^']*'", |lex| unquote(lex.slice()))]
    Str(String),

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    #[token("**")]
    Caret,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
}

fn unquote(slice: &str) -> String {
    slice[1..slice.len() - 1].to_string()
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {n}"),
            Token::Ident(s) => write!(f, "identifier '{s}'"),
            Token::Str(s) => write!(f, "string \"{s}\""),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Star => f.write_str("'*'"),
            Token::Slash => f.write_str("'/'"),
            Token::Caret => f.write_str("'^'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
        }
    }
}

/// Split an expression into tokens paired with their byte spans
pub fn tokenize(source: &str) -> Result<Vec<(Token, Range<usize>)>, String> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(format!(
                    "unexpected input '{}' at byte {}",
                    lexer.slice(),
                    lexer.span().start
                ))
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_numbers_and_operators() {
        assert_eq!(
            kinds("1.5e2 * t ** 2"),
            vec![
                Token::Number(150.0),
                Token::Star,
                Token::Ident("t".into()),
                Token::Caret,
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(
            kinds("lookup('table.txt')"),
            vec![
                Token::Ident("lookup".into()),
                Token::LParen,
                Token::Str("table.txt".into()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_rejects_unknown_characters() {
        assert!(tokenize("w0 ; w1").is_err());
    }
}
