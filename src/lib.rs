//! # token-rename
//!
//! A CLI tool to bulk-rename files by replacing a literal piece of text in
//! their names, across a whole directory tree.
//!
//! This crate provides functionality to:
//! - Collect the target directory, find text and replacement from flags or prompts
//! - Show the resolved configuration and ask for confirmation
//! - Walk the tree and rename every matching file in place
//! - Report each rename or failure, then the number of files renamed
//!
//! ## Usage
//!
//! ```bash
//! # Fully interactive
//! token-rename
//!
//! # Replace underscores with spaces, confirming first
//! token-rename ~/Music --find _ --replace ' '
//!
//! # Scripted, no confirmation
//! token-rename ./photos --find .jpeg --replace .jpg --yes
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface and main entry point
//! - [`renamer`] - Directory walk and in-place renames
//! - [`config`] - Run configuration and path normalization
//! - [`prompt`] - User input abstractions
//! - [`report`] - Per-file output sinks
//! - [`banner`] - Configuration display
//! - [`logging`] - Diagnostic log setup

pub mod banner;
pub mod cli;
pub mod config;
pub mod logging;
pub mod prompt;
pub mod renamer;
pub mod report;
