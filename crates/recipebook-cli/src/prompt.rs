use std::io::{self, Write};

use anyhow::Result;

/// Password from the environment instead of an interactive prompt
pub const PASSWORD_ENV: &str = "RECIPEBOOK_PASSWORD";

/// Drop the line terminator `read_line` keeps. Everything else is the
/// user's input and goes to the API untouched.
fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(&['\n', '\r'][..])
}

fn read_answer(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(strip_line_ending(&input).to_string())
}

/// Use `given` if present, otherwise ask on stdin.
pub fn field(label: &str, given: Option<String>) -> Result<String> {
    match given {
        Some(value) => Ok(value),
        None => read_answer(&format!("{}: ", label)),
    }
}

/// Same as `field`, showing `default` and using it on an empty answer.
pub fn field_with_default(label: &str, given: Option<String>, default: Option<&str>) -> Result<String> {
    match (given, default) {
        (Some(value), _) => Ok(value),
        (None, Some(default)) => {
            let answer = read_answer(&format!("{} [{}]: ", label, default))?;
            Ok(if answer.is_empty() { default.to_string() } else { answer })
        }
        (None, None) => field(label, None),
    }
}

pub fn password() -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        if !password.is_empty() {
            return Ok(password);
        }
    }

    Ok(rpassword::prompt_password("Password: ")?)
}
