// confcat pipeline:
//
//   source (captured API responses / raw item file)
//     -> normalize + dedupe            (confcat-engine)
//     -> sessions.json / .msgpack      (confcat-store)
//     -> per-category CSV reports      (confcat-engine + confcat-store)
//
// Everything reads and writes under one data directory; nothing depends on
// the process working directory.

mod args;
mod commands;
pub mod config;
mod handlers;
mod mcp;
pub mod logging;
pub mod types;
mod views;

pub use args::{CategoryCommand, Cli, Commands, ServiceCommand, SessionCommand, SpeakerCommand};
pub use commands::run;
