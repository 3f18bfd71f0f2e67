//! Utility functions for handling user arguments of commands.

/// Turns a user argument of a command into a bare user id.
///
/// - `me` is replaced with the id of the invoking user
/// - A mention, `@U123` or Slack's escaped `<@U123|alice>`, becomes `U123`
/// - Anything else is returned unchanged
///
/// # Examples
///
/// ```
/// # use rollcall::utils::resolve_user_id;
/// assert_eq!(resolve_user_id("me", "U999"), "U999");
/// assert_eq!(resolve_user_id("<@U123|alice>", "U999"), "U123");
/// ```
pub fn resolve_user_id(argument: &str, invoker_id: &str) -> String {
    if argument == "me" {
        return invoker_id.to_owned();
    }

    let unescaped = argument
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .map(|inner| inner.split('|').next().unwrap_or(inner))
        .unwrap_or(argument);

    unescaped
        .strip_prefix('@')
        .unwrap_or(unescaped)
        .to_owned()
}
