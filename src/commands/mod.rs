//! One module per `git issues` subcommand.
//!
//! Issue and comment commands take a [`Session`] built once in `main`, and
//! return their output as a string so tests can drive them against a mock
//! server and a scripted editor.

pub mod comment;
mod common;
pub mod config;
pub mod edit;
mod format;
pub mod init;
pub mod list;
pub mod new;
pub mod show;

pub use common::Session;
