use nom::branch::alt;
use nom::bytes::complete::take_while;
use nom::bytes::complete::take_while1;
use nom::character::complete::anychar;
use nom::character::complete::char;
use nom::character::complete::satisfy;
use nom::character::complete::space0;
use nom::character::complete::space1;
use nom::combinator::map;
use nom::combinator::opt;
use nom::combinator::recognize;
use nom::multi::many0_count;
use nom::multi::separated_list1;
use nom::sequence::delimited;
use nom::sequence::pair;
use nom::sequence::preceded;
use nom::sequence::terminated;
use nom::sequence::tuple;
use nom::IResult;

use crate::{
    error::{ErrorKind, Result},
    failed,
    types::AddressToken,
};

/// Characters that can never be part of an atom.
const SPECIALS: &str = "()<>@,;:\\\"[]";

/// ASCII white space only; no-break and other Unicode spaces belong to the text.
fn is_wsp(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

pub fn is_separator(ch: char) -> bool {
    ch == ',' || is_wsp(ch)
}

fn is_atext(ch: char) -> bool {
    !is_wsp(ch) && !ch.is_control() && !SPECIALS.contains(ch)
}

fn atom(input: &str) -> IResult<&str, &str> {
    take_while1(is_atext)(input)
}

fn quoted_string(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        char('"'),
        many0_count(alt((
            recognize(pair(char('\\'), anychar)),
            recognize(satisfy(|ch| ch != '"' && ch != '\\')),
        ))),
        char('"'),
    )))(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    alt((atom, quoted_string))(input)
}

fn phrase(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(space1, word))(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
    delimited(char('('), take_while(|ch| ch != '(' && ch != ')'), char(')'))(input)
}

fn domain_literal(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('['),
        take_while(|ch| ch != '[' && ch != ']'),
        char(']'),
    ))(input)
}

/// `local[@domain]`. The domain is optional so bare user and group
/// identifiers can be parsed as well.
pub fn addr_spec(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((quoted_string, atom)),
        opt(pair(char('@'), alt((atom, domain_literal)))),
    ))(input)
}

fn angle_addr(input: &str) -> IResult<&str, &str> {
    delimited(
        pair(char('<'), space0),
        addr_spec,
        pair(space0, char('>')),
    )(input)
}

/// A trailing comment only names the address when there is no phrase.
fn name_addr(input: &str) -> IResult<&str, (Option<&str>, &str)> {
    map(
        tuple((
            opt(terminated(phrase, space0)),
            angle_addr,
            opt(preceded(space0, comment)),
        )),
        |(name, address, comment)| (name.or(comment), address),
    )(input)
}

fn addr_with_comment(input: &str) -> IResult<&str, (Option<&str>, &str)> {
    map(
        pair(addr_spec, opt(preceded(space0, comment))),
        |(address, comment)| (comment, address),
    )(input)
}

/// A single list entry: `[phrase] <addr>`, or `addr [(comment)]`.
pub fn mailbox(input: &str) -> IResult<&str, AddressToken> {
    map(
        alt((name_addr, addr_with_comment)),
        |(name, address)| AddressToken::new(name.and_then(display_name), address),
    )(input)
}

/// Trim a phrase and strip one level of surrounding quotes.
fn display_name(phrase: &str) -> Option<String> {
    let phrase = phrase.trim();

    if phrase.is_empty() {
        return None;
    }

    let unquoted = match phrase.strip_prefix('"').and_then(|p| p.strip_suffix('"')) {
        Some(inner) => {
            let mut name = String::with_capacity(inner.len());
            let mut escaped = false;

            for ch in inner.chars() {
                if ch == '\\' && !escaped {
                    escaped = true;
                    continue;
                }
                escaped = false;
                name.push(ch);
            }

            name
        }
        None => phrase.to_string(),
    };

    Some(unquoted)
}

fn describe(fragment: &str) -> &'static str {
    if fragment.contains('<') && !fragment.contains('>') {
        "Missing '>'"
    } else if fragment.contains('>') && !fragment.contains('<') {
        "Missing '<'"
    } else if fragment.matches('"').count() % 2 == 1 {
        "Missing '\"'"
    } else if fragment.contains('(') && !fragment.contains(')') {
        "Missing ')'"
    } else {
        "Illegal address"
    }
}

/// Parse a comma or whitespace separated list of addresses.
///
/// Empty entries between separators, and entries that are only a comment,
/// are skipped. Any entry that is not a
/// valid address fails the whole list.
pub fn address_list(input: &str) -> Result<Vec<AddressToken>> {
    let mut addresses = Vec::new();
    let mut rest = input.trim_start_matches(is_separator);

    while !rest.is_empty() {
        if let Ok((remaining, _)) = comment(rest) {
            if remaining.is_empty() || remaining.starts_with(is_separator) {
                rest = remaining.trim_start_matches(is_separator);
                continue;
            }
        }

        match mailbox(rest) {
            Ok((remaining, token)) if remaining.is_empty() || remaining.starts_with(is_separator) => {
                addresses.push(token);
                rest = remaining.trim_start_matches(is_separator);
            }
            _ => {
                let position = input[..input.len() - rest.len()].chars().count();
                let fragment = rest.split(',').next().unwrap_or(rest).trim_end();

                failed!(
                    ErrorKind::AddressSyntax {
                        fragment: fragment.to_string(),
                        position,
                    },
                    "{}",
                    describe(fragment)
                );
            }
        }
    }

    Ok(addresses)
}
