//! Slash command parsing for the interactive shell.
//!
//! A leading `/` introduces a command token; the rest of the line is one
//! free-form argument. Every command has a short and a long spelling.

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a store, optionally with a display name.
    CreateStore(Option<String>),

    /// List all stores.
    ListStores,

    /// Select a store for chat queries.
    SelectStore(String),

    /// Delete a store. `confirmed` is true when the literal `yes`
    /// confirmation argument was given.
    DeleteStore { name: String, confirmed: bool },

    /// Upload the configured files directory into the selected store.
    UploadFiles,

    /// Show the currently selected store.
    StoreInfo,

    /// Start a new chat session.
    StartChat,

    /// Reset the current chat session.
    ResetChat,

    /// Show the transcript.
    History,

    /// Export the transcript, optionally to a given file name.
    ExportChat(Option<String>),

    /// Display help information.
    Help,

    /// Exit the application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses a line for a slash command.
///
/// Returns `None` when the line does not start with `/` and should be
/// treated as a chat message. Command tokens are case-sensitive.
pub fn parse(input: &str) -> Option<Command> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?;
    let argument = parts.next().map(str::trim).filter(|s| !s.is_empty());

    let result = match command {
        "create" | "create-store" => Command::CreateStore(argument.map(str::to_string)),
        "list" | "list-stores" => Command::ListStores,
        "select" | "select-store" => match argument {
            Some(name) => Command::SelectStore(name.to_string()),
            None => Command::Invalid("/select requires a store name".to_string()),
        },
        "delete" | "delete-store" => parse_delete(argument),
        "upload" | "upload-files" => Command::UploadFiles,
        "store" | "store-info" => Command::StoreInfo,
        "start" | "start-chat" => Command::StartChat,
        "reset" | "reset-chat" => Command::ResetChat,
        "history" => Command::History,
        "export" | "export-chat" => Command::ExportChat(argument.map(str::to_string)),
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Invalid(format!("Unknown command: /{command}")),
    };

    Some(result)
}

fn parse_delete(argument: Option<&str>) -> Command {
    let Some(arg) = argument else {
        return Command::Invalid("/delete requires a store name".to_string());
    };

    let mut parts = arg.splitn(2, ' ');
    let name = parts.next().unwrap_or_default().to_string();
    let confirmed = parts.next().map(str::trim) == Some("yes");

    Command::DeleteStore { name, confirmed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_spellings_map_to_the_same_command() {
        assert_eq!(parse("/list"), Some(Command::ListStores));
        assert_eq!(parse("/list-stores"), Some(Command::ListStores));
        assert_eq!(parse("/upload"), Some(Command::UploadFiles));
        assert_eq!(parse("/upload-files"), Some(Command::UploadFiles));
        assert_eq!(parse("/start"), Some(Command::StartChat));
        assert_eq!(parse("/start-chat"), Some(Command::StartChat));
        assert_eq!(parse("/reset"), Some(Command::ResetChat));
        assert_eq!(parse("/reset-chat"), Some(Command::ResetChat));
        assert_eq!(parse("/store"), Some(Command::StoreInfo));
        assert_eq!(parse("/store-info"), Some(Command::StoreInfo));
        assert_eq!(parse("/quit"), Some(Command::Quit));
        assert_eq!(parse("/exit"), Some(Command::Quit));
    }

    #[test]
    fn create_takes_an_optional_name() {
        assert_eq!(parse("/create"), Some(Command::CreateStore(None)));
        assert_eq!(
            parse("/create-store project docs"),
            Some(Command::CreateStore(Some("project docs".to_string())))
        );
    }

    #[test]
    fn select_requires_a_name() {
        assert_eq!(
            parse("/select fileSearchStores/abc"),
            Some(Command::SelectStore("fileSearchStores/abc".to_string()))
        );
        assert!(matches!(
            parse("/select"),
            Some(Command::Invalid(msg)) if msg.contains("requires")
        ));
        assert!(matches!(
            parse("/select   "),
            Some(Command::Invalid(msg)) if msg.contains("requires")
        ));
    }

    #[test]
    fn delete_confirmation_is_the_literal_yes() {
        assert_eq!(
            parse("/delete fileSearchStores/abc"),
            Some(Command::DeleteStore {
                name: "fileSearchStores/abc".to_string(),
                confirmed: false,
            })
        );
        assert_eq!(
            parse("/delete-store fileSearchStores/abc yes"),
            Some(Command::DeleteStore {
                name: "fileSearchStores/abc".to_string(),
                confirmed: true,
            })
        );
        assert_eq!(
            parse("/delete fileSearchStores/abc no"),
            Some(Command::DeleteStore {
                name: "fileSearchStores/abc".to_string(),
                confirmed: false,
            })
        );
        assert!(matches!(
            parse("/delete"),
            Some(Command::Invalid(msg)) if msg.contains("requires")
        ));
    }

    #[test]
    fn export_takes_an_optional_filename() {
        assert_eq!(parse("/export"), Some(Command::ExportChat(None)));
        assert_eq!(
            parse("/export-chat report"),
            Some(Command::ExportChat(Some("report".to_string())))
        );
    }

    #[test]
    fn command_tokens_are_case_sensitive() {
        assert!(matches!(parse("/LIST"), Some(Command::Invalid(_))));
        assert!(matches!(parse("/Help"), Some(Command::Invalid(_))));
    }

    #[test]
    fn non_commands_are_chat_messages() {
        assert_eq!(parse("Hello there"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn unknown_commands_are_invalid() {
        assert!(matches!(
            parse("/frobnicate"),
            Some(Command::Invalid(msg)) if msg.contains("/frobnicate")
        ));
    }
}
