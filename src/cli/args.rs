use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};

use crate::config::ResolveOptions;

#[derive(Parser, Debug)]
#[command(name = "harmony-chat")]
#[command(about = "Chat with a local OpenAI-compatible model, showing only its final answer")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub backend: BackendArgs,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Backend overrides shared by every subcommand.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct BackendArgs {
    /// API base URL including the version prefix [env: OPENAI_BASE_URL]
    #[arg(short = 'u', long, global = true)]
    pub base_url: Option<String>,

    /// Model name [env: MODEL_NAME]
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature (0.0 to 2.0)
    #[arg(short = 't', long, global = true)]
    pub temperature: Option<f32>,

    /// Token budget for the system prompt plus replayed history
    #[arg(long, global = true)]
    pub max_history_tokens: Option<usize>,

    /// Request a streamed (SSE) response from the backend
    #[arg(long, global = true)]
    pub stream: bool,

    /// Conversation identifier
    #[arg(long = "session", global = true)]
    pub session_id: Option<String>,
}

impl From<BackendArgs> for ResolveOptions {
    fn from(args: BackendArgs) -> Self {
        Self {
            base_url: args.base_url,
            model: args.model,
            temperature: args.temperature,
            max_history_tokens: args.max_history_tokens,
            stream: args.stream,
            session_id: args.session_id,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat (default)
    Chat,
    /// Print the final-channel text of a saved raw response
    Extract {
        /// File containing the raw response (reads from stdin if not provided)
        file: Option<String>,
    },
    /// Show the resolved configuration
    Config,
    /// Interactively save defaults to the config file
    Configure,
}
