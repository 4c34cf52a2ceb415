//! Formula text from an argument or piped stdin

use std::io::Read;

use super::CliError;

/// Argument value that asks for the formula on stdin.
pub const STDIN_ARG: &str = "-";

/// Resolves the formula argument.
///
/// A missing argument or `-` reads `stdin`, but only when it is piped; an
/// interactive terminal gives [`CliError::NoInput`]. A single trailing line
/// break is dropped.
pub fn read_formula<R: Read>(
    formula: Option<String>,
    stdin_is_terminal: bool,
    mut stdin: R,
) -> Result<String, CliError> {
    match formula {
        Some(text) if text != STDIN_ARG => Ok(text),
        _ if stdin_is_terminal => Err(CliError::NoInput),
        _ => {
            let mut buffer = String::new();
            stdin.read_to_string(&mut buffer)?;
            Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}
