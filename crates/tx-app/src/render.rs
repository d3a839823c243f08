use std::io::Write;

use anyhow::Result;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use tx_core::frame::{Cell, Conversion, ConversionResult};

/// Write a conversion to a terminal-like sink.
///
/// Text is written as is; cell grids become ANSI 256-color escape
/// sequences, reset at the end of every row.
///
/// # Errors
/// Returns an error if the sink fails.
pub fn write_conversion<W: Write>(out: &mut W, conversion: &Conversion) -> Result<()> {
    match &conversion.result {
        ConversionResult::Text(text) => out.write_all(text.as_bytes())?,
        ConversionResult::Cells(rows) => {
            for row in rows {
                write_row(out, row)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn write_row<W: Write>(out: &mut W, row: &[Cell]) -> Result<()> {
    let mut fg: Option<u8> = None;
    let mut bg: Option<u8> = None;
    for cell in row {
        if cell.bg != bg {
            match cell.bg {
                Some(i) => queue!(out, SetBackgroundColor(Color::AnsiValue(i)))?,
                None => queue!(out, SetBackgroundColor(Color::Reset))?,
            }
            bg = cell.bg;
        }
        if cell.fg != fg {
            match cell.fg {
                Some(i) => queue!(out, SetForegroundColor(Color::AnsiValue(i)))?,
                None => queue!(out, SetForegroundColor(Color::Reset))?,
            }
            fg = cell.fg;
        }
        queue!(out, Print(cell.ch))?;
    }
    queue!(out, ResetColor, Print('\n'))?;
    Ok(())
}
