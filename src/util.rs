//! Shared utility functions.

use std::io::{self, Read};
use std::path::Path;

/// Read command input from `file`, or from stdin when no file is given.
pub fn read_input(file: Option<&Path>) -> io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}
