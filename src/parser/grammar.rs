//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse template source into an ordered sequence of operations
pub fn parse(input: &str) -> Result<Template, Vec<crate::ParseError>> {
    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    template_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

fn template_parser<'a, I>() -> impl Parser<'a, I, Template, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let newline = just(Token::Newline);

    // One physical line of a content block. Comment-looking lines are plain
    // content here; a bare newline is an empty line.
    let content_line = choice((
        select! {
            Token::Text(line) => line,
            Token::Comment(line) => line,
        }
        .then_ignore(newline.clone().or_not()),
        newline.clone().to(String::new()),
    ));

    let header = select! { Token::Directive(line) => line };

    // A directive line plus every following line up to the next directive.
    let block = header
        .then_ignore(newline.or_not())
        .then(content_line.clone().repeated().collect::<Vec<String>>())
        .try_map(|(header, lines), span| {
            build_operation(&header, lines).map_err(|msg| Rich::custom(span, msg))
        });

    // Lines before the first directive are skippable: comments, blanks, and
    // stray text alike.
    content_line
        .repeated()
        .ignored()
        .then(block.repeated().collect::<Vec<Option<Operation>>>())
        .map(|((), ops)| Template::new(ops.into_iter().flatten().collect()))
        .then_ignore(end())
}

/// Turn one directive header and its collected block lines into an operation.
///
/// Returns `Ok(None)` for unrecognized directive names: those carry metadata
/// for the invoking tool (such as `@target`) and must stay a silent no-op for
/// forward compatibility.
fn build_operation(header: &str, mut lines: Vec<String>) -> Result<Option<Operation>, String> {
    // Trailing blank lines separate blocks visually; they are not content.
    // Blank lines in the middle of the block stay.
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    let content = lines.join("\n");

    let body = header[1..].trim();
    let (name, args) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (body, ""),
    };

    let op = match name.to_ascii_lowercase().as_str() {
        "full" => Operation::Full { content },
        "line" => {
            let line = args
                .parse::<usize>()
                .map_err(|_| format!("@line expects a line number, got '{}'", args))?;
            Operation::SetLine { line, content }
        }
        "lines" => {
            let (start, end) = parse_range(args)
                .ok_or_else(|| format!("@lines expects a range like '10-12', got '{}'", args))?;
            Operation::SetRange {
                start,
                end,
                content,
            }
        }
        "match" => Operation::ReplaceMatching {
            pattern: unquote(args).to_string(),
            content,
        },
        "append" => Operation::Append { content },
        "prepend" => Operation::Prepend { content },
        _ => return Ok(None),
    };
    Ok(Some(op))
}

fn parse_range(args: &str) -> Option<(usize, usize)> {
    let (start, end) = args.split_once('-')?;
    match (start.parse(), end.parse()) {
        (Ok(start), Ok(end)) => Some((start, end)),
        _ => None,
    }
}

/// Strip one layer of surrounding single or double quotes, if present.
fn unquote(arg: &str) -> &str {
    let arg = arg.trim();
    let bytes = arg.as_bytes();
    if arg.len() >= 2 && bytes[0] == bytes[arg.len() - 1] && (bytes[0] == b'"' || bytes[0] == b'\'')
    {
        &arg[1..arg.len() - 1]
    } else {
        arg
    }
}
