pub mod command;
pub mod config;
pub mod diff;
pub mod dirs;
pub mod env_var;
pub mod logging;
pub mod pager;
pub mod table;
