use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::codec::{self, CodeSnippet, DEFAULT_LANGUAGE};
use crate::config::PadConfig;
use crate::draft::NoteDraft;
use crate::error::{PadError, Result};
use crate::service::{NoteService, UrlStatus};
use crate::session::Session;
use crate::storage::{NoteBackend, SqliteStore, PAD_DIR};

/// Find the pad root by looking for .ghostpad/ or .git/
fn find_pad_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        if current.join(PAD_DIR).exists() || current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd,
        }
    }
}

fn open_service() -> Result<(NoteService<SqliteStore>, Session)> {
    let store = SqliteStore::open(&find_pad_root())?;
    let session = store.config().session();
    Ok((NoteService::new(store), session))
}

/// Read all of stdin, refusing to wait on an interactive terminal.
fn read_stdin() -> Result<String> {
    if atty::is(atty::Stream::Stdin) {
        return Err(PadError::InvalidInput(
            "expected input on stdin".to_string(),
        ));
    }
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

/// Read a "language=path" or bare "path" argument into (language, content).
fn read_snippet_arg(arg: &str) -> Result<(Option<String>, String)> {
    let (language, path) = match arg.split_once('=') {
        Some((language, path)) => (Some(language.trim()).filter(|l| !l.is_empty()), path),
        None => (None, arg),
    };
    let content = fs::read_to_string(path)?;
    Ok((language.map(str::to_string), content.trim_end().to_string()))
}

/// Append snippets read from arguments, using `default_language` when none is given.
fn add_snippet_args(draft: &mut NoteDraft, args: &[String], default_language: &str) -> Result<()> {
    for arg in args {
        let (language, content) = read_snippet_arg(arg)?;
        let id = draft.add_snippet(Some(language.as_deref().unwrap_or(default_language)));
        draft.update_snippet(id, content);
    }
    Ok(())
}

pub fn handle_init(anonymous: bool) -> Result<()> {
    let root = env::current_dir()?;

    let config = PadConfig {
        user_id: (!anonymous).then(Uuid::new_v4),
        ..PadConfig::default()
    };
    SqliteStore::init(&root, &config)?;

    println!("Initialized ghostpad in {}", root.display());
    if let Some(id) = config.user_id {
        println!("  local identity: {}", id);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_new(
    title: Option<String>,
    text: Option<String>,
    snippets: Vec<String>,
    stdin: bool,
    url: Option<String>,
    reserve: bool,
    json: bool,
) -> Result<()> {
    let (service, session) = open_service()?;

    let url = if stdin {
        // Already encoded, store verbatim
        service.save_content(read_stdin()?, url.as_deref(), reserve, &session)?
    } else {
        let mut draft = NoteDraft::new();
        draft.title = title.unwrap_or_default();
        draft.text_content = text.unwrap_or_default();
        let default_language = &service.backend().config().default_language;
        add_snippet_args(&mut draft, &snippets, default_language)?;
        service.save(&draft, url.as_deref(), reserve, &session)?
    };

    if json {
        let view = service.open(&url)?;
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("Created note {}", url);
    }

    Ok(())
}

pub fn handle_show(url: String, json: bool, raw: bool) -> Result<()> {
    let (service, _) = open_service()?;
    let view = service.open(&url)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if raw {
        print!("{}", view.note.content.as_deref().unwrap_or_default());
        return Ok(());
    }

    let mut meta = format!(
        "{} - expires in {} days - v{}",
        view.note.url,
        view.note.days_remaining(Utc::now()),
        view.note.version_number
    );
    if view.note.is_reserved {
        meta.push_str(" - reserved");
    }

    println!("{}", view.decoded.title);
    println!("{}", meta);
    if !view.decoded.text_content.is_empty() {
        println!("\n{}", view.decoded.text_content);
    }
    for (i, snippet) in view.decoded.code_snippets.iter().enumerate() {
        println!("\n[{}] {}", i + 1, snippet.language);
        println!("{}", snippet.content);
    }

    Ok(())
}

pub fn handle_edit(
    url: String,
    title: Option<String>,
    text: Option<String>,
    add_snippets: Vec<String>,
    remove_snippets: Vec<usize>,
    stdin: bool,
) -> Result<()> {
    let (service, session) = open_service()?;

    if stdin {
        service.edit_content(&url, &read_stdin()?, &session)?;
        println!("Updated note {}", url);
        return Ok(());
    }

    let view = service.open(&url)?;
    let mut draft = NoteDraft::from_content(view.note.content.as_deref().unwrap_or_default());

    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(text) = text {
        draft.text_content = text;
    }

    // Remove from the back so earlier positions stay valid
    let mut positions = remove_snippets;
    positions.sort_unstable();
    positions.dedup();
    for position in positions.into_iter().rev() {
        let id = position
            .checked_sub(1)
            .and_then(|i| draft.snippets.get(i))
            .map(|s| s.id)
            .ok_or_else(|| PadError::InvalidInput(format!("no snippet at position {}", position)))?;
        draft.remove_snippet(id);
    }

    let default_language = &service.backend().config().default_language;
    add_snippet_args(&mut draft, &add_snippets, default_language)?;

    service.edit(&url, &draft, &session)?;
    println!("Updated note {}", url);

    Ok(())
}

pub fn handle_check(url: String, json: bool) -> Result<()> {
    let (service, _) = open_service()?;
    let (url, status) = service.url_status(&url)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "url": url, "status": status }))?
        );
        return Ok(());
    }

    match status {
        UrlStatus::Available => println!("{} is available", url),
        UrlStatus::Taken => println!("{} is already taken", url),
        UrlStatus::Reserved => println!("{} is reserved", url),
    }
    Ok(())
}

pub fn handle_delete(url: String) -> Result<()> {
    let (service, session) = open_service()?;
    service.backend().delete_note(&url, &session)?;
    println!("Deleted note {}", url);
    Ok(())
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct EncodeInput {
    title: String,
    #[serde(alias = "textContent")]
    text_content: String,
    #[serde(alias = "codeSnippets", alias = "snippets")]
    code_snippets: Vec<SnippetInput>,
}

#[derive(Deserialize)]
struct SnippetInput {
    #[serde(default)]
    language: Option<String>,
    content: String,
}

pub fn handle_encode() -> Result<()> {
    let input: EncodeInput = serde_json::from_str(&read_stdin()?)?;
    let snippets: Vec<CodeSnippet> = input
        .code_snippets
        .into_iter()
        .map(|s| {
            let language = s.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
            CodeSnippet::new(language, s.content)
        })
        .collect();

    print!("{}", codec::encode(&input.title, &input.text_content, &snippets));
    Ok(())
}

pub fn handle_decode() -> Result<()> {
    let decoded = codec::decode(&read_stdin()?);
    println!("{}", serde_json::to_string_pretty(&decoded)?);
    Ok(())
}

pub fn handle_reserved(json: bool) -> Result<()> {
    let (service, session) = open_service()?;
    let notes = service.backend().list_reserved(&session)?;
    let max = service.backend().config().max_reserved;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("No reserved notes. (0/{} used)", max);
    } else {
        println!("Reserved notes ({}/{} used):\n", notes.len(), max);
        let now = Utc::now();
        for note in notes {
            println!(
                "  {:<24} {:>3} days left  {}",
                note.url,
                note.days_remaining(now),
                note.decoded().title
            );
        }
    }

    Ok(())
}

pub fn handle_favorite_add(url: String) -> Result<()> {
    let (service, session) = open_service()?;
    service.backend().add_favorite(&url, &session)?;
    println!("Added {} to favorites", url);
    Ok(())
}

pub fn handle_favorite_remove(url: String) -> Result<()> {
    let (service, session) = open_service()?;
    service.backend().remove_favorite(&url, &session)?;
    println!("Removed {} from favorites", url);
    Ok(())
}

pub fn handle_favorite_list(json: bool) -> Result<()> {
    let (service, session) = open_service()?;
    let favorites = service.backend().list_favorites(&session)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&favorites)?);
    } else if favorites.is_empty() {
        println!("No favorite notes yet.");
    } else {
        println!("Favorites:\n");
        for favorite in favorites {
            println!(
                "  {:<24} added {}",
                favorite.note_url,
                favorite.created_at.format("%Y-%m-%d")
            );
        }
    }

    Ok(())
}

pub fn handle_purge() -> Result<()> {
    let (service, _) = open_service()?;
    let removed = service.backend().purge_expired(Utc::now())?;
    println!("Removed {} expired notes", removed);
    Ok(())
}
