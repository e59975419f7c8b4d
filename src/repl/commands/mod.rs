//! # REPL Commands
//!
//! Maps one input line to one page action, the way a click or form submit
//! does in the web client. Parsing is pure; the controller executes.

use crate::repl::models::{EntryField, EntryForm, EntryId, Route, SortOrder};

pub const HELP_TEXT: &str = "\
Login page:
  login <username> <password>     log in
  signup <username> <password>    create an account and log in
  toggle                          switch between login and create-account
Vault page:
  whoami                          show the logged-in user
  list                            reload the vault
  sort <order>                    title | title_reversed | date_added | date_added_reversed
  search [query]                  search, or toggle the search window
  clear                           clear the search
  open <id>                       view an entry
  add [title=.. url=.. username=.. password=..]
                                  values run until the next field=
  set <field> <value>             edit a field of the add form or open entry
  save                            submit the add form or the open entry
  delete | check | reveal         act on the open entry
  settings                        open settings
  passwd <new>                    set a new master password
  passwd <old> <new>              change it; <old> must not contain spaces
  cancel                          close the open window
  delete-account                  delete the account
General:
  goto <path>   logout   help   quit";

/// A single user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Goto(Route),
    Login { username: String, password: String },
    Signup { username: String, password: String },
    TogglePane,
    WhoAmI,
    Logout,
    List,
    Sort(SortOrder),
    ToggleSearch,
    Search(String),
    ClearSearch,
    Open(EntryId),
    ShowAdd,
    Add(EntryForm),
    Set { field: EntryField, value: String },
    Save,
    Delete,
    Check,
    Reveal,
    Settings,
    SetMasterPassword(String),
    ChangePassword { old: String, new: String },
    Cancel,
    DeleteAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("invalid {argument} '{value}'")]
    InvalidArgument {
        argument: &'static str,
        value: String,
    },
}

/// Split off the first whitespace-delimited word, returning it and the rest
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], input[end..].trim_start()),
        None => (input, ""),
    }
}

fn required<'a>(
    value: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, ParseError> {
    if value.is_empty() {
        Err(ParseError::MissingArgument { command, argument })
    } else {
        Ok(value)
    }
}

/// Username followed by a password that may contain spaces
fn credentials<'a>(rest: &'a str, command: &'static str) -> Result<(&'a str, &'a str), ParseError> {
    let (username, password) = split_word(rest);
    let username = required(username, command, "a username")?;
    let password = required(password, command, "a password")?;
    Ok((username, password))
}

/// Fields named as `key=value` at the start of a word, with the offset where each value begins
fn field_starts(rest: &str) -> Vec<(usize, EntryField, usize)> {
    let mut starts = Vec::new();
    let mut previous = None;
    for (index, ch) in rest.char_indices() {
        let at_word_start = !ch.is_whitespace() && previous.map_or(true, char::is_whitespace);
        previous = Some(ch);
        if !at_word_start {
            continue;
        }
        let (word, _) = split_word(&rest[index..]);
        if let Some((key, _)) = word.split_once('=') {
            if let Some(field) = EntryField::parse(key) {
                starts.push((index, field, index + key.len() + 1));
            }
        }
    }
    starts
}

/// Parse `title=.. url=.. username=.. password=..`
///
/// A value runs until the next `field=` word, so it may contain spaces.
/// Only the last value keeps trailing whitespace.
fn entry_form(rest: &str) -> Result<EntryForm, ParseError> {
    let starts = field_starts(rest);
    if starts.first().map(|(index, _, _)| *index) != Some(0) {
        let (word, _) = split_word(rest);
        return Err(match word.split_once('=') {
            Some((key, _)) => ParseError::InvalidArgument {
                argument: "field",
                value: key.to_string(),
            },
            None => ParseError::InvalidArgument {
                argument: "field (expected key=value)",
                value: word.to_string(),
            },
        });
    }

    let mut form = EntryForm::default();
    for (position, (_, field, value_start)) in starts.iter().enumerate() {
        let value = match starts.get(position + 1) {
            Some((next, _, _)) => rest[*value_start..*next].trim_end(),
            None => &rest[*value_start..],
        };
        form.set(*field, value);
    }
    Ok(form)
}

impl Command {
    /// Action name for logs; never includes arguments, which may hold secrets
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Quit => "quit",
            Self::Goto(_) => "goto",
            Self::Login { .. } => "login",
            Self::Signup { .. } => "signup",
            Self::TogglePane => "toggle",
            Self::WhoAmI => "whoami",
            Self::Logout => "logout",
            Self::List => "list",
            Self::Sort(_) => "sort",
            Self::ToggleSearch => "toggle-search",
            Self::Search(_) => "search",
            Self::ClearSearch => "clear",
            Self::Open(_) => "open",
            Self::ShowAdd => "show-add",
            Self::Add(_) => "add",
            Self::Set { .. } => "set",
            Self::Save => "save",
            Self::Delete => "delete",
            Self::Check => "check",
            Self::Reveal => "reveal",
            Self::Settings => "settings",
            Self::SetMasterPassword(_) => "passwd",
            Self::ChangePassword { .. } => "passwd",
            Self::Cancel => "cancel",
            Self::DeleteAccount => "delete-account",
        }
    }

    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let (word, rest) = split_word(line);
        if word.is_empty() {
            return Err(ParseError::Empty);
        }

        let command = match word.to_ascii_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "goto" => Self::Goto(Route::parse(required(rest, "goto", "a path")?)),
            "login" => {
                let (username, password) = credentials(rest, "login")?;
                Self::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                }
            }
            "signup" | "create" => {
                let (username, password) = credentials(rest, "signup")?;
                Self::Signup {
                    username: username.to_string(),
                    password: password.to_string(),
                }
            }
            "toggle" => Self::TogglePane,
            "whoami" => Self::WhoAmI,
            "logout" => Self::Logout,
            "list" | "ls" => Self::List,
            "sort" => Self::Sort(SortOrder::parse(required(rest, "sort", "an order")?)),
            "search" | "find" if rest.is_empty() => Self::ToggleSearch,
            "search" | "find" => Self::Search(rest.to_string()),
            "clear" => Self::ClearSearch,
            "open" | "view" => {
                let id = required(rest, "open", "an entry id")?;
                Self::Open(id.parse().map_err(|_| ParseError::InvalidArgument {
                    argument: "entry id",
                    value: id.to_string(),
                })?)
            }
            "add" if rest.is_empty() => Self::ShowAdd,
            "add" => Self::Add(entry_form(rest)?),
            "set" => {
                let (name, value) = split_word(rest);
                let name = required(name, "set", "a field name")?;
                let field = EntryField::parse(name).ok_or_else(|| ParseError::InvalidArgument {
                    argument: "field",
                    value: name.to_string(),
                })?;
                Self::Set {
                    field,
                    value: value.to_string(),
                }
            }
            "save" => Self::Save,
            "delete" | "rm" => Self::Delete,
            "check" => Self::Check,
            "reveal" | "show" => Self::Reveal,
            "settings" => Self::Settings,
            "passwd" => {
                let (first, second) = split_word(rest);
                let first = required(first, "passwd", "a new password")?;
                if second.is_empty() {
                    Self::SetMasterPassword(first.to_string())
                } else {
                    Self::ChangePassword {
                        old: first.to_string(),
                        new: second.to_string(),
                    }
                }
            }
            "cancel" => Self::Cancel,
            "delete-account" => Self::DeleteAccount,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_should_read_login_with_spaced_password() {
        assert_eq!(
            Command::parse("login alice correct horse battery"),
            Ok(Command::Login {
                username: "alice".to_string(),
                password: "correct horse battery".to_string(),
            })
        );
    }

    #[test]
    fn parse_should_require_login_arguments() {
        assert_eq!(
            Command::parse("login alice"),
            Err(ParseError::MissingArgument {
                command: "login",
                argument: "a password"
            })
        );
    }

    #[test]
    fn parse_should_read_add_fields() {
        let command =
            Command::parse("add title=Bank url=bank.com username=alice password=p@ss").unwrap();
        assert_eq!(
            command,
            Command::Add(EntryForm::new("Bank", "bank.com", "alice", "p@ss"))
        );
        assert_eq!(Command::parse("add"), Ok(Command::ShowAdd));
    }

    #[test]
    fn parse_should_read_add_values_with_spaces() {
        let command =
            Command::parse("add title=My Bank url=bank.com username=alice password=p@ss").unwrap();
        assert_eq!(
            command,
            Command::Add(EntryForm::new("My Bank", "bank.com", "alice", "p@ss"))
        );

        let command = Command::parse("add password=correct horse title=Two words").unwrap();
        assert_eq!(
            command,
            Command::Add(EntryForm::new("Two words", "", "", "correct horse"))
        );
    }

    #[test]
    fn parse_should_keep_equals_signs_inside_add_values() {
        let command = Command::parse("add url=bank.com/?a=b password=x=y notes=z").unwrap();
        assert_eq!(
            command,
            Command::Add(EntryForm::new("", "bank.com/?a=b", "", "x=y notes=z"))
        );
    }

    #[test]
    fn parse_should_reject_unknown_add_field() {
        assert!(matches!(
            Command::parse("add notes=secret"),
            Err(ParseError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Command::parse("add title"),
            Err(ParseError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn parse_should_toggle_search_without_query() {
        assert_eq!(Command::parse("search"), Ok(Command::ToggleSearch));
        assert_eq!(
            Command::parse("search my bank"),
            Ok(Command::Search("my bank".to_string()))
        );
    }

    #[test]
    fn parse_should_read_entry_ids_and_routes() {
        assert_eq!(Command::parse("open 42"), Ok(Command::Open(42)));
        assert!(matches!(
            Command::parse("open abc"),
            Err(ParseError::InvalidArgument { .. })
        ));
        assert_eq!(
            Command::parse("goto /vault/add-password"),
            Ok(Command::Goto(Route::AddEntry))
        );
    }

    #[test]
    fn parse_should_distinguish_passwd_forms() {
        assert_eq!(
            Command::parse("passwd fresh"),
            Ok(Command::SetMasterPassword("fresh".to_string()))
        );
        assert_eq!(
            Command::parse("passwd old new"),
            Ok(Command::ChangePassword {
                old: "old".to_string(),
                new: "new".to_string()
            })
        );
        assert_eq!(
            Command::parse("passwd a b c"),
            Ok(Command::ChangePassword {
                old: "a".to_string(),
                new: "b c".to_string()
            })
        );
    }

    #[test]
    fn parse_should_read_set_with_spaces() {
        assert_eq!(
            Command::parse("set title My Bank"),
            Ok(Command::Set {
                field: EntryField::Title,
                value: "My Bank".to_string()
            })
        );
    }

    #[test]
    fn parse_should_report_empty_and_unknown() {
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert_eq!(
            Command::parse("dance"),
            Err(ParseError::Unknown("dance".to_string()))
        );
        assert_eq!(Command::parse("SORT date_added"), Ok(Command::Sort(SortOrder::DateAdded)));
    }
}
