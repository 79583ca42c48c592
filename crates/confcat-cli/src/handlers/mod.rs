mod context;

pub mod category;
pub mod collect;
pub mod encode;
pub mod init;
pub mod pipeline;
pub mod report;
pub mod serve;
pub mod service;
pub mod session;
pub mod speaker;

pub use context::HandlerContext;
