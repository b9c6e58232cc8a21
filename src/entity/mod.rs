mod favorite;
mod note;

pub use favorite::Favorite;
pub use note::{Note, NoteVersion};
