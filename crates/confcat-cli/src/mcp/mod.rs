mod server;
mod tools;

pub use server::run_server;
