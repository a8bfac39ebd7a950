//! Splits a template into literal text and verbs, and interpolates args.

use crate::args::Arg;
use crate::error::FillError;
use crate::verb::Verb;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Literal(String),
    Verb(Verb),
}

/// `%%` is a literal percent and `%<letter>` a verb. A `%` before anything
/// else stays literal, so percent-encoded text like `%2F` passes through.
pub(crate) fn tokenize(template: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                literal.push('%');
            }
            Some(next) => match Verb::from_char(next) {
                Some(verb) => {
                    chars.next();
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(Token::Verb(verb));
                }
                None => literal.push('%'),
            },
            None => literal.push('%'),
        }
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

/// Substitutes `args` into the verbs of `template`, in order. Error
/// indices are positions in `args`.
pub(crate) fn interpolate(template: &str, args: &[Arg]) -> Result<String, FillError> {
    let mut out = String::with_capacity(template.len());
    let mut next = 0;

    for token in tokenize(template) {
        let verb = match token {
            Token::Literal(s) => {
                out.push_str(&s);
                continue;
            }
            Token::Verb(verb) => verb,
        };
        let letter = verb.letter();
        if let Verb::Other(_) = verb {
            return Err(FillError::UnsupportedVerb { verb: letter });
        }
        let arg = args.get(next).ok_or(FillError::MissingArgument {
            index: next,
            verb: letter,
        })?;
        let rendered = verb.render(arg).ok_or_else(|| FillError::BadArgument {
            index: next,
            verb: letter,
            found: arg.type_name(),
            value: arg.to_string(),
        })?;
        out.push_str(&rendered);
        next += 1;
    }

    if next < args.len() {
        return Err(FillError::ExtraArguments {
            count: args.len() - next,
        });
    }
    Ok(out)
}
