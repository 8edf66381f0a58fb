//! Literal Harmony protocol tokens.

/// Opens a segment header; the channel label follows immediately.
pub const CHANNEL: &str = "<|channel|>";

/// Separates a segment header from its content.
pub const MESSAGE: &str = "<|message|>";

/// Ends the current message.
pub const END: &str = "<|end|>";

/// Starts the next message header.
pub const START: &str = "<|start|>";

/// Ends a message that is a tool call.
pub const CALL: &str = "<|call|>";

/// Ends the final message of an assistant turn.
pub const RETURN: &str = "<|return|>";

/// Every token that can close a segment's content.
pub const TERMINATORS: &[&str] = &[END, START, CALL, RETURN];

/// Channel whose content is shown to the user.
pub const FINAL_CHANNEL: &str = "final";

/// Builds the header that introduces content on `channel`,
/// e.g. `<|channel|>final<|message|>`.
pub fn segment_header(channel: &str) -> String {
    format!("{CHANNEL}{channel}{MESSAGE}")
}

/// Channel labels of every complete segment header in `text`, in order.
///
/// A header is complete when `<|message|>` follows before the next
/// `<|channel|>`. The label ends at the first whitespace or token, so
/// `commentary to=functions.x <|constrain|>json` yields `commentary`.
pub fn header_channels(text: &str) -> impl Iterator<Item = &str> {
    text.split(CHANNEL).skip(1).filter_map(|rest| {
        let (header, _) = rest.split_once(MESSAGE)?;
        let end = header
            .find(|c: char| c.is_whitespace() || c == '<')
            .unwrap_or(header.len());
        Some(&header[..end])
    })
}
