//! Utility functions for the CLI.

use oxitext::{Encoding, LookupOptions, TextError};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Lookup options for the selected profile.
pub fn lookup_options(email: bool, allow_replacement: bool) -> LookupOptions {
    let options = if email {
        LookupOptions::EMAIL
    } else {
        LookupOptions::WEB
    };
    if allow_replacement {
        options.with_replacement()
    } else {
        options
    }
}

/// Resolve a label given on the command line.
pub fn encoding_for(label: &str, email: bool) -> Result<Encoding, TextError> {
    Encoding::lookup(label, lookup_options(email, false))
        .ok_or_else(|| TextError::unknown_encoding(label))
}

fn file_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != "-")
}

/// Open the input file, or stdin for `None` and `-`.
pub fn open_input(path: Option<&Path>) -> io::Result<Box<dyn Read>> {
    match file_path(path) {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Create the output file, or use stdout for `None` and `-`.
pub fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match file_path(path) {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
