mod commands;
mod handlers;

pub use commands::{Cli, Commands, FavoriteAction, FavoriteCommand};
pub use handlers::{
    handle_check, handle_decode, handle_delete, handle_edit, handle_encode, handle_favorite_add,
    handle_favorite_list, handle_favorite_remove, handle_init, handle_new, handle_purge,
    handle_reserved, handle_show,
};
