//! Command dispatch and handler modules.

mod common;
mod pkgbuild;
mod tree;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Pkgbuild { kohadir } => pkgbuild::exec(&kohadir).await,
        Command::Tree { kohadir } => tree::exec(&kohadir).await,
    }
}
