use once_cell::sync::Lazy;
use regex::Regex;

// @module: Script line grammars

// @const: Engine-wide constant declaration, e.g. `SWORDNAME=Sword` or `DESC=Hello,World`
static GLOBAL_DECLARATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?(?:NAME|DESC|TIP))=(.*?)(?:,(.*))?$").unwrap()
});

// @const: Any `key = value` line
static STANDARD_ASSIGNMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(.*?)=(.*)$").unwrap()
});

/// Commands whose whole value is player-visible text (matched case-insensitively)
pub const BLOCK_TEXT_COMMANDS: [&str; 8] = [
    "desc", "window", "altwin", "editwin", "leftwin", "silentwin", "inputwin", "choice",
];

/// Commands that assign a display name (matched exactly)
pub const NAME_COMMANDS: [&str; 3] = ["name", "if_name", "pickname"];

/// A script line that matched one of the two grammars
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    /// `<...NAME|DESC|TIP>=<value>[,<trailing>]` in the globals file
    GlobalDeclaration {
        /// Key token, ending in NAME, DESC or TIP
        key: &'a str,
        /// Value up to the first comma
        value: &'a str,
        /// Everything after the first comma, if a comma is present
        trailing: Option<&'a str>,
    },
    /// `<command>=<value>` anywhere else
    StandardAssignment {
        /// Trimmed left-hand side
        command: &'a str,
        /// Trimmed right-hand side
        value: &'a str,
    },
}

impl<'a> ParsedLine<'a> {
    /// Parse a line with the grammar selected by `is_global`
    pub fn parse(line: &'a str, is_global: bool) -> Option<Self> {
        let line = line.trim_end_matches(['\n', '\r']);
        if is_global {
            Self::parse_global(line)
        } else {
            Self::parse_standard(line)
        }
    }

    fn parse_global(line: &'a str) -> Option<Self> {
        let caps = GLOBAL_DECLARATION_REGEX.captures(line)?;
        Some(ParsedLine::GlobalDeclaration {
            key: caps.get(1)?.as_str(),
            value: caps.get(2).map_or("", |m| m.as_str()),
            trailing: caps.get(3).map(|m| m.as_str()),
        })
    }

    fn parse_standard(line: &'a str) -> Option<Self> {
        let caps = STANDARD_ASSIGNMENT_REGEX.captures(line)?;
        Some(ParsedLine::StandardAssignment {
            command: caps.get(1)?.as_str().trim(),
            value: caps.get(2).map_or("", |m| m.as_str()).trim(),
        })
    }

    /// The single original a global declaration contributes.
    ///
    /// A non-empty trailing segment wins over the value before the comma.
    pub fn global_original(&self) -> Option<&'a str> {
        match self {
            ParsedLine::GlobalDeclaration { value, trailing, .. } => match trailing {
                Some(trailing) if !trailing.is_empty() => Some(trailing.trim()),
                _ => Some(value.trim()),
            },
            ParsedLine::StandardAssignment { .. } => None,
        }
    }
}

/// Whether `command` assigns a display name
pub fn is_name_command(command: &str) -> bool {
    NAME_COMMANDS.contains(&command)
}

/// Whether `command` carries block text
pub fn is_block_text_command(command: &str) -> bool {
    let lower = command.to_lowercase();
    BLOCK_TEXT_COMMANDS.contains(&lower.as_str())
}
