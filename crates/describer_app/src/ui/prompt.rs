use std::io::{self, BufRead, Write};

/// Asks a yes/no question on stdout; anything but `y`/`yes` is a no.
pub(crate) fn confirm(question: &str) -> io::Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{question} [y/N] ")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// True for the line that stops a running batch.
pub(crate) fn is_stop_command(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "s" | "stop")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }

    #[test]
    fn stop_command_accepts_short_form() {
        assert!(is_stop_command("s\n"));
        assert!(is_stop_command("Stop"));
        assert!(!is_stop_command("start"));
    }
}
