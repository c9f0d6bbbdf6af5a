//! Output formatting for CLI results
//!
//! Every printer writes to any [`WriteColor`] so the same code serves the
//! terminal and tests. Use [`stdout`] for a stream that colors only when
//! asked to and when attached to a terminal.

use crate::compression::lz::Factor;
use crate::index::store::DuplicateStore;
use crate::search::repeats::Repeat;
use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Stdout stream honouring `color` and whether stdout is a terminal
pub fn stdout(color: bool) -> StandardStream {
    let choice = if color && io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

fn write_position<W: WriteColor>(out: &mut W, position: usize) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "{}", position)?;
    out.reset()
}

/// Escape a byte run for display, keeping printable ASCII as is
fn escape(bytes: &[u8]) -> String {
    bytes.escape_ascii().to_string()
}

/// Print one line per hit: the position, then the match with `context` bytes
/// on each side, the match itself highlighted
pub fn print_search_hits<W: WriteColor>(
    out: &mut W,
    text: &[u8],
    positions: &[usize],
    pattern_len: usize,
    context: usize,
) -> io::Result<()> {
    for &position in positions {
        let start = position.min(text.len());
        let end = (position + pattern_len).min(text.len());
        let before = start.saturating_sub(context);
        let after = (end + context).min(text.len());

        write_position(out, position)?;
        write!(out, ":")?;

        // Text before match
        write!(out, "{}", escape(&text[before..start]))?;

        // The match itself (highlighted)
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", escape(&text[start..end]))?;
        out.reset()?;

        // Text after match
        writeln!(out, "{}", escape(&text[end..after]))?;
    }

    Ok(())
}

/// Print repeats as `length first second` with the repeated bytes
pub fn print_repeats<W: WriteColor>(
    out: &mut W,
    text: &[u8],
    repeats: &[Repeat],
) -> io::Result<()> {
    for repeat in repeats {
        write!(out, "{} ", repeat.length)?;
        write_position(out, repeat.first)?;
        write!(out, " ")?;
        write_position(out, repeat.second)?;

        if let Some(bytes) = text.get(repeat.first..repeat.first + repeat.length) {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(out, " {}", escape(bytes))?;
            out.reset()?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Print each duplicated substring with the positions it occurs at
pub fn print_duplicates<W: WriteColor>(out: &mut W, store: &DuplicateStore) -> io::Result<()> {
    for (substring, positions) in store.positions_by_substring() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        write!(out, "{}", escape(substring))?;
        out.reset()?;
        write!(out, ":")?;

        for position in positions {
            write!(out, " ")?;
            write_position(out, position)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Print `position longest` for every position, including zeros
pub fn print_length_series<W: Write>(out: &mut W, series: &[usize]) -> io::Result<()> {
    for (position, longest) in series.iter().enumerate() {
        writeln!(out, "{} {}", position, longest)?;
    }
    Ok(())
}

/// Print one factor per line: literals escaped, references as `(source, len)`
pub fn print_factors<W: WriteColor>(out: &mut W, factors: &[Factor]) -> io::Result<()> {
    for factor in factors {
        match factor {
            Factor::Literal(byte) => writeln!(out, "{}", escape(&[*byte]))?,
            Factor::Reference { source, len } => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
                writeln!(out, "({}, {})", source, len)?;
                out.reset()?;
            }
        }
    }
    Ok(())
}
