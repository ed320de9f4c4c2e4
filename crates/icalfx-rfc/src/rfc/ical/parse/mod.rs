//! iCalendar parsing (RFC 5545).
//!
//! - `lexer`: unfolding and content-line tokenization
//! - `values`: typed value parsers
//! - `parser`: component and document assembly

mod error;
mod lexer;
mod parser;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{parse_content_line, split_lines, unfold};
pub use parser::{parse, parse_component, parse_property};
pub use values::{
    parse_binary, parse_boolean, parse_date, parse_datetime, parse_duration, parse_float,
    parse_integer, parse_period, parse_rrule, parse_temporal, parse_utc_offset, parse_value,
    split_text_list, unescape_text,
};
