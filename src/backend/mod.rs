mod client;
mod sse_parser;

pub use client::{ChatClient, ChatRequest};
