//! Parser for lines typed into an interactive selection session

/// Parsed session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Free text typed into the filter box
    Filter(String),
    /// `+<address>`
    Select(String),
    /// `-<address>`
    Deselect(String),
    /// `:default a,b,c` replaces the selection
    Default(Vec<String>),
    /// `:show`
    Show,
    /// `:q`
    Quit,
    /// `:<anything else>`
    Unknown(String),
}

/// Parse one input line
pub fn parse_session_line(input: &str) -> SessionCommand {
    let input = input.trim();

    if let Some(address) = input.strip_prefix('+') {
        return SessionCommand::Select(address.trim().to_string());
    }
    if let Some(address) = input.strip_prefix('-') {
        return SessionCommand::Deselect(address.trim().to_string());
    }
    let Some(command) = input.strip_prefix(':') else {
        return SessionCommand::Filter(input.to_string());
    };

    let mut parts = command.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(str::trim).unwrap_or("");

    match cmd.to_lowercase().as_str() {
        "q" | "quit" | "exit" => SessionCommand::Quit,
        "show" | "ls" => SessionCommand::Show,
        "default" | "def" => SessionCommand::Default(
            args.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => SessionCommand::Unknown(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select_and_deselect() {
        assert_eq!(parse_session_line("+abc"), SessionCommand::Select("abc".to_string()));
        assert_eq!(parse_session_line(" - abc "), SessionCommand::Deselect("abc".to_string()));
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_session_line("0xab"), SessionCommand::Filter("0xab".to_string()));
        assert_eq!(parse_session_line(""), SessionCommand::Filter(String::new()));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_session_line(":q"), SessionCommand::Quit);
        assert_eq!(parse_session_line(":SHOW"), SessionCommand::Show);
        assert_eq!(
            parse_session_line(":default a, b,,c"),
            SessionCommand::Default(vec!["a".into(), "b".into(), "c".into()])
        );
        assert_eq!(parse_session_line(":default"), SessionCommand::Default(vec![]));
        assert_eq!(
            parse_session_line(":nope"),
            SessionCommand::Unknown(":nope".to_string())
        );
    }
}
