//! CLI argument definitions for koha-perldeps.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "koha-perldeps",
    version,
    about = "Resolve Koha's Perl dependencies against the Arch Linux package ecosystem",
    long_about = "Takes the directory of an unpacked Koha release tarball (found under \
                  https://download.koha-community.org) and prints either the PKGBUILD for \
                  the koha-perldeps-meta AUR package or the AUR dependency tree of Koha's \
                  Perl dependencies."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the PKGBUILD for the koha-perldeps-meta package
    #[command(alias = "p")]
    Pkgbuild {
        /// Directory of the unpacked Koha release
        kohadir: PathBuf,
    },

    /// Print the AUR dependency tree, annotated with maintainers
    #[command(alias = "t")]
    Tree {
        /// Directory of the unpacked Koha release
        kohadir: PathBuf,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
