mod directory;
mod traits;

pub use directory::Directory;
pub use traits::{ContactRepository, PhonesByName};
