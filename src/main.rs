//! Interactive shell for the Gemini file search chat client.
//!
//! Reads line-oriented input: `/`-prefixed commands manage stores and the
//! chat session; anything else is sent to the model as a chat message.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use gemini_search_chat::chat::{commands, export, render, ChatSession, Command};
use gemini_search_chat::{Config, FileSearchStore, Gemini, StoreManager};

struct Shell {
    config: Config,
    manager: StoreManager,
    session: ChatSession,
    current_store: Option<FileSearchStore>,
}

impl Shell {
    fn new(config: Config) -> Result<Self, gemini_search_chat::ClientError> {
        let gemini = Gemini::with_model(config.api_key.clone(), config.model.clone())?;
        let manager = StoreManager::new(gemini.clone(), config.store_prefix.clone());
        let session = ChatSession::new(gemini, config.clone());
        Ok(Self {
            config,
            manager,
            session,
            current_store: None,
        })
    }

    async fn dispatch(&mut self, command: Command) {
        match command {
            Command::CreateStore(name) => self.create_store(name).await,
            Command::ListStores => self.list_stores().await,
            Command::SelectStore(name) => self.select_store(&name).await,
            Command::DeleteStore { name, confirmed } => self.delete_store(&name, confirmed).await,
            Command::UploadFiles => self.upload_files().await,
            Command::StoreInfo => self.store_info(),
            Command::StartChat => self.start_chat(),
            Command::ResetChat => self.reset_chat(),
            Command::History => self.show_history(),
            Command::ExportChat(filename) => self.export_chat(filename.as_deref()),
            Command::Help => render::print_help(),
            Command::Invalid(message) => {
                render::print_error(&message);
                render::print_info("Type '/help' for available commands");
            }
            // Quit is handled by the read loop.
            Command::Quit => {}
        }
    }

    async fn create_store(&mut self, name: Option<String>) {
        render::print_info("\nCreating file search store...");
        match self.manager.create(name).await {
            Ok(store) => {
                render::print_info("\nStore created successfully!");
                println!("Store name: {}", store.name);
                if let Some(display_name) = &store.display_name {
                    println!("Display name: {display_name}");
                }
                render::print_info(&format!("Use '/select {}' to chat against it", store.name));
            }
            Err(err) => render::print_error(&format!("creating store failed: {err}")),
        }
    }

    async fn list_stores(&mut self) {
        match self.manager.list().await {
            Ok(stores) => render::print_store_list(&stores),
            Err(err) => render::print_error(&format!("listing stores failed: {err}")),
        }
    }

    async fn select_store(&mut self, name: &str) {
        match self.manager.get(name).await {
            Ok(Some(store)) => {
                self.session.set_active_stores(vec![store.name.clone()]);
                render::print_info(&format!("\nSelected store: {}", store.name));
                self.current_store = Some(store);
            }
            Ok(None) => {
                render::print_error(&format!("store not found: {name}"));
                render::print_info("Use '/list' to see available stores");
            }
            Err(err) => render::print_error(&format!("looking up store failed: {err}")),
        }
    }

    async fn delete_store(&mut self, name: &str, confirmed: bool) {
        if !confirmed {
            render::print_warning(&format!(
                "\nThis permanently deletes '{name}' and all its documents."
            ));
            render::print_info(&format!("Run '/delete {name} yes' to confirm"));
            return;
        }

        match self.manager.delete(name, true).await {
            Ok(()) => {
                render::print_info(&format!("\nDeleted file search store: {name}"));
                if self
                    .current_store
                    .as_ref()
                    .is_some_and(|store| store.name == name)
                {
                    self.current_store = None;
                    self.session.set_active_stores(Vec::new());
                    render::print_info("Current store deselected.");
                }
            }
            Err(err) => render::print_error(&format!("deleting store failed: {err}")),
        }
    }

    async fn upload_files(&mut self) {
        let Some(store) = self.current_store.clone() else {
            render::print_error("no store selected");
            render::print_info("Use '/select <store-name>' or '/create' first");
            return;
        };

        render::print_info(&format!(
            "\nUploading files from: {}",
            self.config.files_dir.display()
        ));
        render::print_info(&format!("To store: {}", store.name));

        match self
            .manager
            .upload_directory(&store.name, &self.config.files_dir)
            .await
        {
            Ok(summary) if summary.total() == 0 => {
                render::print_info(&format!(
                    "\nNo files found in {}",
                    self.config.files_dir.display()
                ));
            }
            Ok(summary) => {
                render::print_info(&format!(
                    "\nUploaded {}/{} file(s)",
                    summary.succeeded,
                    summary.total()
                ));
                for (file, message) in &summary.failures {
                    render::print_error(&format!("{file}: {message}"));
                }
            }
            Err(err) => render::print_error(&format!("upload failed: {err}")),
        }
    }

    fn store_info(&self) {
        match &self.current_store {
            Some(store) => render::print_store_info(store),
            None => {
                render::print_info("\nNo store currently selected.");
                render::print_info("Use '/select <store-name>' to select a store");
            }
        }
    }

    fn start_chat(&mut self) {
        if self.session.is_active() {
            render::print_info("\nA chat session is already active.");
            render::print_info("Use '/reset' to discard it and start over");
            return;
        }

        self.session.start_session();
        render::print_info(&format!(
            "\nChat session started with model: {}",
            self.config.model
        ));
        match &self.current_store {
            Some(store) => render::print_info(&format!("Using file search store: {}", store.name)),
            None => {
                render::print_warning("No file search store selected. Chat will work without file search.");
                render::print_info("Use '/select <store-name>' to enable file search.");
            }
        }
    }

    fn reset_chat(&mut self) {
        if !self.session.is_active() {
            render::print_info("\nNo active chat session to reset.");
            return;
        }
        self.session.reset();
        render::print_info("\nChat session reset.");
    }

    fn show_history(&self) {
        let turns = self.session.history();
        if turns.is_empty() {
            render::print_info("\nNo chat history available.");
            return;
        }
        render::print_history(turns);
    }

    fn export_chat(&self, filename: Option<&str>) {
        let turns = self.session.history();
        if turns.is_empty() {
            render::print_info("\nNo chat history available to export.");
            return;
        }

        let now = OffsetDateTime::now_utc();
        let filename = export::resolve_filename(filename, now);
        let store_name = self.current_store.as_ref().map(|store| store.name.as_str());
        let document = export::render_markdown(turns, &self.config.model, store_name, now);

        match export::write_export(&self.config.export_dir, &filename, &document) {
            Ok(path) => {
                render::print_info(&format!("\nChat exported successfully to: {}", path.display()))
            }
            Err(err) => render::print_error(&format!("exporting chat failed: {err}")),
        }
    }

    async fn chat_message(&mut self, message: &str) {
        if !self.session.is_active() {
            render::print_info("\nPlease start a chat session first using '/start'");
            return;
        }

        if self.current_store.is_none() {
            render::print_warning("No file search store selected; answering without file search.");
        }

        match self.session.send(message).await {
            Ok(turn) => render::print_response(&turn),
            Err(err) => render::print_error(&format!("sending message failed: {err}")),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            std::process::exit(1);
        }
    };

    let mut shell = match Shell::new(config) {
        Ok(shell) => shell,
        Err(err) => {
            eprintln!("Failed to initialize client: {err}");
            std::process::exit(1);
        }
    };

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("Failed to initialize terminal: {err}");
            std::process::exit(1);
        }
    };

    render::print_banner(&shell.config);

    loop {
        match editor.readline("\nYou: ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);

                match commands::parse(&line) {
                    Some(Command::Quit) => break,
                    Some(command) => shell.dispatch(command).await,
                    None => shell.chat_message(&line).await,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                render::print_error(&err.to_string());
                break;
            }
        }
    }

    println!("\nGoodbye!");
}
