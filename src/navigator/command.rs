//! Commands accepted while browsing a folder

/// A parsed browse-loop command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `to NAME`
    To(String),
    /// `info NAME`
    Info(String),
    /// `all file info in NAME`
    FilesIn(String),
    /// `all file info in all folders NAME`
    FilesInAll(String),
    /// `back` or `exit`
    Back,
}

impl Command {
    /// Parse one input line. `None` means the line is not a command.
    pub fn parse(input: &str) -> Option<Command> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("back") || input.eq_ignore_ascii_case("exit") {
            return Some(Command::Back);
        }

        // Longest verb first: "all file info in all folders x" also
        // starts with "all file info in".
        let forms: [(&str, fn(String) -> Command); 4] = [
            ("all file info in all folders", Command::FilesInAll),
            ("all file info in", Command::FilesIn),
            ("info", Command::Info),
            ("to", Command::To),
        ];

        for (verb, build) in forms {
            let Some(rest) = input.strip_prefix(verb) else {
                continue;
            };
            // The verb must end at a word boundary: "today" is not "to".
            if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                continue;
            }
            let name = rest.trim();
            return (!name.is_empty()).then(|| build(name.to_string()));
        }
        None
    }
}
