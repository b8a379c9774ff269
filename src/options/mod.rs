mod create_options;
mod delete_options;
mod list_options;
mod mkdirs_options;
mod open_options;

pub use create_options::CreateOptions;
pub use delete_options::DeleteOptions;
pub use list_options::ListOptions;
pub use mkdirs_options::MkdirsOptions;
pub use open_options::OpenOptions;
