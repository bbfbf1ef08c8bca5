//! Worker identities and their tool registries.

use std::fmt;
use std::time::Duration;

use toolwire::tools::RegistryError;
use toolwire::types::ServerIdentity;
use toolwire::{ProtocolHandler, ServerConfig, ToolRegistry};

use crate::tools::{
    delete_file, echo, execute_command, fail, get_current_dir, get_environment_variable,
    list_directory, read_file, write_file, PathResolver,
};

/// The workers this crate ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Worker {
    /// File and directory operations.
    Filesystem,
    /// Program execution and environment lookup.
    Command,
    /// Echo and an always-failing tool, for self-tests.
    Echo,
    /// Handshake only; the host serves memory tools itself.
    MemoryStore,
}

impl Worker {
    /// Every worker, in a stable order.
    pub const ALL: [Worker; 4] = [
        Worker::Filesystem,
        Worker::Command,
        Worker::Echo,
        Worker::MemoryStore,
    ];

    /// Name advertised in `serverInfo`.
    pub fn server_name(self) -> &'static str {
        match self {
            Worker::Filesystem => "filesystem-mcp",
            Worker::Command => "command-mcp",
            Worker::Echo => "echo-mcp",
            Worker::MemoryStore => "memory-store-mcp",
        }
    }

    /// Identity advertised at initialization.
    pub fn identity(self) -> ServerIdentity {
        ServerIdentity::new(self.server_name(), env!("CARGO_PKG_VERSION"))
    }

    /// Build the tool registry for this worker.
    pub fn registry(self, config: &ServerConfig) -> Result<ToolRegistry, RegistryError> {
        let builder = ToolRegistry::builder();
        let builder = match self {
            Worker::Filesystem => {
                let paths = PathResolver::new(config.filesystem.root.clone());
                builder
                    .register(
                        list_directory::definition(),
                        list_directory::ListDirectory::new(paths.clone()),
                    )?
                    .register(
                        read_file::definition(),
                        read_file::ReadFile::new(paths.clone()),
                    )?
                    .register(
                        write_file::definition(),
                        write_file::WriteFile::new(paths.clone()),
                    )?
                    .register(
                        delete_file::definition(),
                        delete_file::DeleteFile::new(paths.clone()),
                    )?
                    .register(
                        get_current_dir::definition(),
                        get_current_dir::GetCurrentDir::new(paths),
                    )?
            }
            Worker::Command => builder
                .register(
                    execute_command::definition(),
                    execute_command::ExecuteCommand::new(Duration::from_secs(
                        config.command.default_timeout_secs,
                    )),
                )?
                .register(
                    get_environment_variable::definition(),
                    get_environment_variable::GetEnvironmentVariable,
                )?,
            Worker::Echo => builder
                .register(echo::definition(), echo::Echo)?
                .register(fail::definition(), fail::Fail)?,
            Worker::MemoryStore => builder,
        };
        Ok(builder.build())
    }

    /// Identity and registry wired into a protocol handler.
    pub fn build_handler(self, config: &ServerConfig) -> Result<ProtocolHandler, RegistryError> {
        Ok(ProtocolHandler::new(self.identity(), self.registry(config)?))
    }
}

impl fmt::Display for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.server_name())
    }
}
