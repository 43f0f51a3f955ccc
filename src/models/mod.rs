pub mod entry;
pub mod reference;
pub mod user;

pub use entry::{Entry, EntryUpdate};
pub use reference::{ReferenceItem, ReferenceKind};
pub use user::{Identity, Role, User};
