use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{Error, Result};

/// Writes `order` one index per line to `path`, or stdout when `None`.
pub fn write_order(order: &[usize], path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::other(format!("failed to create output file {}: {e}", path.display()))
            })?;
            write_lines(BufWriter::new(file), order)
        }
        None => write_lines(BufWriter::new(io::stdout().lock()), order),
    }
}

fn write_lines<W: Write>(mut out: W, order: &[usize]) -> Result<()> {
    for idx in order {
        writeln!(out, "{idx}")?;
    }
    out.flush()?;
    Ok(())
}
