use clap::Parser;
use ghostpad::cli::{
    handle_check, handle_decode, handle_delete, handle_edit, handle_encode, handle_favorite_add,
    handle_favorite_list, handle_favorite_remove, handle_init, handle_new, handle_purge,
    handle_reserved, handle_show, Cli, Commands, FavoriteAction,
};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { anonymous } => handle_init(anonymous),
        Commands::New {
            title,
            text,
            snippets,
            stdin,
            url,
            reserve,
            json,
        } => handle_new(title, text, snippets, stdin, url, reserve, json),
        Commands::Show { url, json, raw } => handle_show(url, json, raw),
        Commands::Edit {
            url,
            title,
            text,
            add_snippets,
            remove_snippets,
            stdin,
        } => handle_edit(url, title, text, add_snippets, remove_snippets, stdin),
        Commands::Check { url, json } => handle_check(url, json),
        Commands::Delete { url } => handle_delete(url),
        Commands::Encode => handle_encode(),
        Commands::Decode => handle_decode(),
        Commands::Reserved { json } => handle_reserved(json),
        Commands::Favorite(fav) => match fav.action {
            FavoriteAction::Add { url } => handle_favorite_add(url),
            FavoriteAction::Remove { url } => handle_favorite_remove(url),
            FavoriteAction::List { json } => handle_favorite_list(json),
        },
        Commands::Purge => handle_purge(),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
