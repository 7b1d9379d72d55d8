pub mod cli;
pub mod config;
pub mod document;
pub mod domain;
pub mod errors;
pub mod extensions;
pub mod services;
