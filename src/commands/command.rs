//! Command parsing.
//!
//! This module converts the text of a slash command into a structured
//! [`Command`]. Parsing never fails: missing arguments are reported by the
//! handlers, and any unknown verb falls through to the random pick.

use log::debug;

/// Represents a parsed slash command.
///
/// User arguments are kept as typed (`me`, mentions) and resolved by the
/// handlers, which know the invoking user.
#[derive(Debug, Hash, PartialEq, Eq)]
pub enum Command {
    /// Add a user to the current channel
    ///
    /// # Fields
    ///
    /// * `Option<String>` - User argument
    /// * `Option<String>` - Alias
    Add(Option<String>, Option<String>),
    /// Remove a user from the current channel
    ///
    /// # Fields
    ///
    /// * `Option<String>` - User argument
    Remove(Option<String>),
    /// Set or, without alias, clear the alias of a user
    ///
    /// # Fields
    ///
    /// * `Option<String>` - User argument
    /// * `Option<String>` - Alias
    Alias(Option<String>, Option<String>),
    /// List every channel roster and alias
    List,
    /// Reset the current channel, or everything when `true`
    Reset(bool),
    /// Display help information
    Help,
    /// Pick a random member of the current channel
    Pick,
}

impl Command {
    /// Parses the text of a slash command into a Command.
    ///
    /// The text is split on whitespace into at most three tokens: the verb and
    /// two arguments. Extra tokens are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rollcall::commands::command::Command;
    /// let command = Command::parse("add me Alice");
    /// assert_eq!(command, Command::Add(Some("me".to_owned()), Some("Alice".to_owned())));
    ///
    /// assert_eq!(Command::parse(""), Command::Pick);
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut tokens = text.split_whitespace().map(str::to_owned);
        let verb = tokens.next().unwrap_or_default();
        let arg1 = tokens.next();
        let arg2 = tokens.next();

        debug!(
            "parsing command: verb={:?}, arg1={:?}, arg2={:?}",
            verb, arg1, arg2
        );

        match verb.as_str() {
            "add" => Command::Add(arg1, arg2),
            "remove" => Command::Remove(arg1),
            "alias" => Command::Alias(arg1, arg2),
            "ls" => Command::List,
            "reset" => Command::Reset(arg1.as_deref() == Some("hard")),
            "help" => Command::Help,
            _ => Command::Pick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_command() {
        assert_eq!(
            Command::parse("add U123 Bob"),
            Command::Add(Some("U123".to_owned()), Some("Bob".to_owned()))
        );
    }

    #[test]
    fn test_parse_add_command_without_arguments() {
        assert_eq!(Command::parse("add"), Command::Add(None, None));
    }

    #[test]
    fn test_parse_remove_command() {
        assert_eq!(
            Command::parse("remove me"),
            Command::Remove(Some("me".to_owned()))
        );
    }

    #[test]
    fn test_parse_alias_command_without_alias() {
        assert_eq!(
            Command::parse("alias U123"),
            Command::Alias(Some("U123".to_owned()), None)
        );
    }

    #[test]
    fn test_parse_ls_command() {
        assert_eq!(Command::parse("ls"), Command::List);
    }

    #[test]
    fn test_parse_reset_commands() {
        assert_eq!(Command::parse("reset"), Command::Reset(false));
        assert_eq!(Command::parse("reset hard"), Command::Reset(true));
        assert_eq!(Command::parse("reset soft"), Command::Reset(false));
    }

    #[test]
    fn test_parse_help_command() {
        assert_eq!(Command::parse("help"), Command::Help);
    }

    #[test]
    fn test_parse_empty_and_unknown_verbs_pick() {
        assert_eq!(Command::parse(""), Command::Pick);
        assert_eq!(Command::parse("   "), Command::Pick);
        assert_eq!(Command::parse("who"), Command::Pick);
        assert_eq!(Command::parse("ADD U1"), Command::Pick);
    }

    #[test]
    fn test_parse_ignores_extra_tokens_and_spacing() {
        assert_eq!(
            Command::parse("  alias   U123 Mary Jane"),
            Command::Alias(Some("U123".to_owned()), Some("Mary".to_owned()))
        );
    }
}
