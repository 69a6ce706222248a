//! STEP/IFC entity parsing
//!
//! Tokenizes `#id=IFCTYPE(...);` instance lines into owned attribute values
//! and scans whole files for entity boundaries. Owned values are required
//! here: the store mutates and grows its graph at runtime, so attribute data
//! cannot borrow the source text.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1, one_of},
    combinator::{map, map_res, opt, recognize},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

use crate::error::{Error, Result};
use crate::schema::IfcType;
use crate::value::{AttrValue, EntityInstance};

/// Parse entity reference: #123
fn entity_ref(input: &str) -> IResult<&str, AttrValue> {
    map(
        preceded(
            char('#'),
            map_res(digit1, |s: &str| lexical_core::parse::<u32>(s.as_bytes())),
        ),
        AttrValue::Ref,
    )(input)
}

/// Parse string literal: 'text'
/// IFC doubles a quote to escape it within a string; the doubling is folded
/// away so stored names compare cleanly.
fn string_literal(input: &str) -> IResult<&str, AttrValue> {
    let mut rest = input;
    rest = match rest.strip_prefix('\'') {
        Some(r) => r,
        None => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Char,
            )))
        }
    };

    let bytes = rest.as_bytes();
    let mut out = String::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\'' {
            if bytes.get(i + 1) == Some(&b'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            return Ok((&rest[i + 1..], AttrValue::Text(out)));
        }
        let ch_len = utf8_len(bytes[i]);
        out.push_str(&rest[i..i + ch_len]);
        i += ch_len;
    }

    // No closing quote found
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

#[inline]
fn utf8_len(first: u8) -> usize {
    match first {
        b if b < 0x80 => 1,
        b if b < 0xE0 => 2,
        b if b < 0xF0 => 3,
        _ => 4,
    }
}

/// Parse integer: 42, -42
fn integer(input: &str) -> IResult<&str, AttrValue> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        lexical_core::parse::<i64>(s.as_bytes()).map(AttrValue::Integer)
    })(input)
}

/// Parse real: 3.14, -3.14, 1.5E-10, 0.
/// IFC allows reals like "0." without decimal digits.
fn real(input: &str) -> IResult<&str, AttrValue> {
    map_res(
        recognize(tuple((
            opt(char('-')),
            digit1,
            char('.'),
            opt(digit1),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: &str| fast_float::parse::<f64, _>(s).map(AttrValue::Real),
    )(input)
}

/// Parse enum literal: .T., .UNSET., .ELEMENT.
fn enum_value(input: &str) -> IResult<&str, AttrValue> {
    map(
        delimited(
            char('.'),
            take_while1(|c: char| c.is_alphanumeric() || c == '_'),
            char('.'),
        ),
        |s: &str| AttrValue::Enum(s.to_string()),
    )(input)
}

/// Parse null: $
fn null(input: &str) -> IResult<&str, AttrValue> {
    map(char('$'), |_| AttrValue::Null)(input)
}

/// Parse derived: *
fn derived(input: &str) -> IResult<&str, AttrValue> {
    map(char('*'), |_| AttrValue::Derived)(input)
}

/// Parse typed select value: IFCLABEL('A'), IFCBOOLEAN(.T.)
/// Select values wrap exactly one inner token.
fn typed_value(input: &str) -> IResult<&str, AttrValue> {
    map(
        pair(
            take_while1(|c: char| c.is_alphanumeric() || c == '_'),
            delimited(char('('), token, char(')')),
        ),
        |(type_name, inner): (&str, AttrValue)| {
            AttrValue::Typed(type_name.to_string(), Box::new(inner))
        },
    )(input)
}

/// Parse list: (1, 2, 3) or nested lists
fn list(input: &str) -> IResult<&str, AttrValue> {
    map(
        delimited(
            char('('),
            separated_list0(delimited(ws, char(','), ws), token),
            char(')'),
        ),
        AttrValue::List,
    )(input)
}

/// Skip whitespace
fn ws(input: &str) -> IResult<&str, ()> {
    map(take_while(|c: char| c.is_whitespace()), |_| ())(input)
}

/// Parse a token with optional surrounding whitespace
fn token(input: &str) -> IResult<&str, AttrValue> {
    delimited(
        ws,
        alt((
            real, // Try real before integer (real includes '.')
            integer,
            entity_ref,
            string_literal,
            enum_value,
            list,
            typed_value,
            null,
            derived,
        )),
        ws,
    )(input)
}

/// Parse a complete entity line
/// Example: #123=IFCWALL('guid',#5,'name',$,$,$,$,$);
pub fn parse_entity(input: &str) -> Result<EntityInstance> {
    let result: IResult<&str, (u32, &str, Vec<AttrValue>)> = tuple((
        delimited(
            ws,
            preceded(
                char('#'),
                map_res(digit1, |s: &str| lexical_core::parse::<u32>(s.as_bytes())),
            ),
            ws,
        ),
        preceded(
            char('='),
            delimited(
                ws,
                take_while1(|c: char| c.is_alphanumeric() || c == '_'),
                ws,
            ),
        ),
        delimited(
            char('('),
            separated_list0(delimited(ws, char(','), ws), token),
            tuple((char(')'), ws, char(';'))),
        ),
    ))(input);

    match result {
        Ok((_, (id, type_str, attributes))) => Ok(EntityInstance::new(
            id,
            IfcType::from_name(type_str),
            attributes,
        )),
        Err(e) => Err(Error::parse(
            0,
            format!(
                "failed to parse entity: {} (input: {:?})",
                e,
                &input[..input.len().min(80)]
            ),
        )),
    }
}

/// Fast entity scanner - finds entity lines without full parsing
///
/// Uses SIMD-accelerated byte search for the `#`/`;` boundaries. A `#` not
/// followed by digits and `=` (an inline reference) is skipped.
pub struct EntityScanner<'a> {
    content: &'a str,
    position: usize,
}

impl<'a> EntityScanner<'a> {
    /// Create a new scanner over full file content
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            position: 0,
        }
    }

    /// Reset scanner to beginning
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl<'a> Iterator for EntityScanner<'a> {
    /// (express id, full entity slice including trailing `;`)
    type Item = (u32, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.content.as_bytes();
        let len = bytes.len();

        while self.position < len {
            let hash_offset = memchr::memchr(b'#', &bytes[self.position..])?;
            let start = self.position + hash_offset;
            let mut pos = start + 1;

            let id_start = pos;
            while pos < len && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            let id_end = pos;

            // Allow `#45 = ` as well as `#45=`
            while pos < len && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }

            if id_end == id_start || pos >= len || bytes[pos] != b'=' {
                // Inline reference or stray hash; keep scanning
                self.position = id_end.max(start + 1);
                continue;
            }

            let semicolon = match memchr::memchr(b';', &bytes[pos..]) {
                Some(offset) => pos + offset,
                None => {
                    self.position = len;
                    return None;
                }
            };

            let id = lexical_core::parse::<u32>(&bytes[id_start..id_end]).ok()?;
            self.position = semicolon + 1;
            return Some((id, &self.content[start..self.position]));
        }

        None
    }
}
