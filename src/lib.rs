//! # harmony-chat - Harmony-aware chat CLI
//!
//! `harmony-chat` talks to a locally hosted, OpenAI-compatible model server
//! (llama.cpp, vLLM, Ollama) and prints only the `final` channel of each
//! Harmony-formatted reply. Reasoning on the `analysis` and `commentary`
//! channels is never shown.
//!
//! ## Quick Start
//!
//! ```bash
//! # Chat with gpt-oss-20b on llama.cpp's default port
//! harmony-chat
//!
//! # Point at another server and model
//! OPENAI_BASE_URL=http://gpu-box:8000/v1 MODEL_NAME=gpt-oss-120b harmony-chat
//!
//! # Post-process a saved raw response
//! harmony-chat extract reply.txt
//! ```
//!
//! ## Configuration
//!
//! Settings are read from CLI flags, then the environment (a `.env` file is
//! loaded first), then `~/.config/harmony-chat/config.toml`:
//!
//! ```toml
//! [chat]
//! base_url = "http://localhost:8080/v1"
//! model = "gpt-oss-20b"
//! temperature = 0.7
//! max_history_tokens = 3000
//! ```

/// HTTP client for OpenAI-compatible chat completions.
pub mod backend;

/// Interactive chat mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and resolution.
pub mod config;

/// File system utilities.
pub mod fs;

/// Harmony final-channel extraction.
pub mod harmony;

/// Conversation history and prompt assembly.
pub mod history;

/// Input reading from files and stdin.
pub mod input;

/// Tracing subscriber setup.
pub mod logging;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Terminal UI components (spinner, colors).
pub mod ui;

pub use harmony::extract_output;
