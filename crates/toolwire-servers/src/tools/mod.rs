//! Tool implementations, one module per tool.

pub mod delete_file;
pub mod echo;
pub mod execute_command;
pub mod fail;
pub mod get_current_dir;
pub mod get_environment_variable;
pub mod list_directory;
pub mod paths;
pub mod read_file;
pub mod write_file;

pub use paths::PathResolver;
