pub mod config;
pub mod logging;

pub mod descriptor;
pub mod download;
pub mod extract;
pub mod fetch;
mod http;
pub mod pipeline;
