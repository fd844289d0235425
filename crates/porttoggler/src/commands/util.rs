//! Shared helpers for command handlers.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal on stdin, reads a single line instead: `y` or `yes`
/// (any case) confirms, anything else (including EOF) declines.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }

    if !io::stdin().is_terminal() {
        return confirm_from_reader(message, &mut io::stdin().lock());
    }

    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Prompt(e.to_string()))
}

fn confirm_from_reader(message: &str, input: &mut impl BufRead) -> Result<bool, CliError> {
    {
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "{message} [y/N] ");
        let _ = stderr.flush();
    }

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// Read and parse a JSON file for `--from-file`.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| CliError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn answer(input: &str) -> bool {
        confirm_from_reader("Disable?", &mut input.as_bytes()).unwrap()
    }

    #[test]
    fn yes_answers_confirm() {
        assert!(answer("y\n"));
        assert!(answer("YES\n"));
        assert!(answer("  yes  \n"));
    }

    #[test]
    fn anything_else_declines() {
        assert!(!answer("n\n"));
        assert!(!answer("\n"));
        assert!(!answer(""));
        assert!(!answer("yep\n"));
    }

    #[test]
    fn yes_flag_skips_prompt() {
        assert!(confirm("Disable?", true).unwrap());
    }

    #[test]
    fn reads_json_object_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"enabled": false, "vlan": 20}"#).unwrap();
        let value = read_json_file(file.path()).unwrap();
        assert_eq!(value["vlan"], 20);
    }

    #[test]
    fn malformed_json_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = read_json_file(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Json { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
