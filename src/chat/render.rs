//! Terminal rendering for the interactive shell.

use colored::Colorize;

use crate::chat::citations::Citations;
use crate::chat::session::ChatTurn;
use crate::config::Config;
use crate::file_search::FileSearchStore;
use crate::generation::model::Role;

const RULE_WIDTH: usize = 70;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn print_banner(config: &Config) {
    println!("\n{}", rule());
    println!("  {}", "GEMINI FILE SEARCH CHAT".bold());
    println!("{}", rule());
    println!("\nModel: {}", config.model);
    println!("Files directory: {}", config.files_dir.display());
    println!("\nType '/help' for available commands");
    println!("Type '/quit' to exit");
    println!("{}", rule());
}

pub fn print_help() {
    println!("\n{}", rule());
    println!("AVAILABLE COMMANDS");
    println!("{}", rule());
    println!("\nFile search store management:");
    println!("  /create [name]           - Create a new file search store");
    println!("  /list                    - List all file search stores");
    println!("  /select <name>           - Select a store for chat queries");
    println!("  /delete <name> yes       - Delete a file search store");
    println!("  /upload                  - Upload files from the files directory");
    println!("  /store                   - Show current store information");
    println!("\nChat commands:");
    println!("  /start                   - Start a new chat session");
    println!("  /reset                   - Reset the current chat session");
    println!("  /history                 - Show chat history");
    println!("  /export [filename]       - Export chat history as markdown");
    println!("\nGeneral:");
    println!("  /help                    - Show this help message");
    println!("  /quit or /exit           - Exit the application");
    println!("\nCommands support both short (/create) and long (/create-store) forms.");
    println!("To chat, simply type your message without a command prefix.");
    println!("{}", rule());
}

pub fn print_info(message: &str) {
    println!("{message}");
}

pub fn print_warning(message: &str) {
    println!("{}", message.yellow());
}

pub fn print_error(message: &str) {
    eprintln!("{}", format!("Error: {message}").red());
}

pub fn print_store_list(stores: &[FileSearchStore]) {
    if stores.is_empty() {
        println!("\nNo file search stores found.");
        return;
    }

    println!("\n{}", rule());
    println!("File Search Stores ({})", stores.len());
    println!("{}", rule());

    for (i, store) in stores.iter().enumerate() {
        println!("\n{}. Store name: {}", i + 1, store.name.bold());
        if let Some(display_name) = &store.display_name {
            println!("   Display name: {display_name}");
        }
        println!("   Created: {}", store.create_time);
    }

    println!("\n{}", rule());
}

pub fn print_store_info(store: &FileSearchStore) {
    println!("\n{}", rule());
    println!("CURRENT STORE INFORMATION");
    println!("{}", rule());
    println!("\nStore name: {}", store.name.bold());
    if let Some(display_name) = &store.display_name {
        println!("Display name: {display_name}");
    }
    println!("Created: {}", store.create_time);
    if let Some(active) = store.active_documents_count {
        println!("Active documents: {active}");
    }
    if let Some(pending) = store.pending_documents_count {
        println!("Pending documents: {pending}");
    }
    if let Some(failed) = store.failed_documents_count {
        println!("Failed documents: {failed}");
    }
    if let Some(size) = store.size_bytes {
        println!("Size: {size} bytes");
    }
    println!("{}", rule());
}

pub fn print_response(turn: &ChatTurn) {
    println!("\n{} {}", "Assistant:".green().bold(), turn.text);

    if let Some(citations) = &turn.citations {
        if !citations.is_empty() {
            print_citations(citations);
        }
    }
}

fn print_citations(citations: &Citations) {
    println!("\n{}", rule());
    println!("CITATIONS");
    println!("{}", rule());

    if let Some(queries) = &citations.search_queries {
        println!("\nSearch queries used:");
        println!("  {queries}");
    }

    if !citations.sources.is_empty() {
        println!("\nSources ({}):", citations.sources.len());
        for (i, source) in citations.sources.iter().enumerate() {
            let title = source.title.as_deref().unwrap_or("(untitled)");
            println!("\n{}. {}", i + 1, title.bold());
            if let Some(uri) = &source.uri {
                println!("   URI: {uri}");
            }
        }
    }

    if citations.grounded_segments > 0 {
        println!(
            "\nGrounding supports: {} segment(s) grounded",
            citations.grounded_segments
        );
    }

    println!("{}", rule());
}

pub fn print_history(turns: &[ChatTurn]) {
    println!("\n{}", rule());
    println!("CHAT HISTORY");
    println!("{}", rule());

    for turn in turns {
        let role = match turn.role {
            Role::User => "USER",
            Role::Model => "MODEL",
        };
        println!("\n{}: {}", role.bold(), turn.text);
    }

    println!("\n{}", rule());
}
