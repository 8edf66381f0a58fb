use anyhow::Result;

use crate::chat::ChatSession;
use crate::config::{ResolveOptions, load_config};

pub async fn run_chat(options: &ResolveOptions) -> Result<()> {
    let config = load_config(options)?;
    let mut session = ChatSession::new(config);
    session.run().await
}
