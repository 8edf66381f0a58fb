use tracing::debug;

use super::markers::{FINAL_CHANNEL, TERMINATORS, header_channels, segment_header};

/// Shown when the model produced internal channels but no final answer.
pub const MISSING_FINAL_NOTICE: &str =
    "(The model did not return a final-channel answer. Please try again.)";

/// Outcome of running the extractor over one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Input was empty.
    Empty,
    /// Trimmed content of the last designated-channel segment.
    Final(String),
    /// Other channels were present without a designated segment; their
    /// content is dropped.
    Withheld(&'static str),
    /// No recognized markers; the text is returned as-is.
    PassThrough(String),
}

impl Extraction {
    /// Returns the text to display.
    pub fn into_text(self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Final(text) | Self::PassThrough(text) => text,
            Self::Withheld(notice) => notice.to_string(),
        }
    }
}

/// Selects the user-facing segment from Harmony-formatted text.
///
/// Only the designated channel is ever surfaced. If any other channel header
/// is present without a designated segment, the content is replaced by a
/// fixed notice.
#[derive(Debug, Clone)]
pub struct Extractor {
    channel: String,
    designated: String,
    terminators: Vec<String>,
    notice: &'static str,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(FINAL_CHANNEL).with_terminators(TERMINATORS.iter().copied())
    }
}

impl Extractor {
    /// Creates an extractor for `channel` with no terminators, so a
    /// designated segment runs to the end of the input.
    pub fn new(channel: &str) -> Self {
        Self {
            channel: channel.to_string(),
            designated: segment_header(channel),
            terminators: Vec::new(),
            notice: MISSING_FINAL_NOTICE,
        }
    }

    #[must_use]
    pub fn with_terminators<'a>(mut self, tokens: impl IntoIterator<Item = &'a str>) -> Self {
        self.terminators.extend(tokens.into_iter().map(str::to_string));
        self
    }

    #[must_use]
    pub fn with_notice(mut self, notice: &'static str) -> Self {
        self.notice = notice;
        self
    }

    pub fn extract(&self, raw: &str) -> Extraction {
        if raw.is_empty() {
            return Extraction::Empty;
        }

        if let Some(pos) = raw.rfind(&self.designated) {
            let content = &raw[pos + self.designated.len()..];
            let end = self.nearest_terminator(content).unwrap_or(content.len());
            debug!(offset = pos, len = end, "extracted designated segment");
            return Extraction::Final(content[..end].trim().to_string());
        }

        // The designated header only counts as the exact literal above; any
        // other label, with or without attributes, is withheld.
        if let Some(label) = header_channels(raw).find(|label| *label != self.channel) {
            debug!(
                channel = label,
                bytes = raw.len(),
                "withholding response without designated segment"
            );
            return Extraction::Withheld(self.notice);
        }

        Extraction::PassThrough(raw.to_string())
    }

    // Lowest offset among all terminators, whatever their kind.
    fn nearest_terminator(&self, content: &str) -> Option<usize> {
        self.terminators
            .iter()
            .filter_map(|token| content.find(token.as_str()))
            .min()
    }
}

/// Returns the text of the last `final` segment in `raw`.
///
/// Falls back to [`MISSING_FINAL_NOTICE`] when segments of other channels
/// (`analysis`, `commentary`, tool calls) are present without a final one,
/// and returns `raw` unchanged when it contains no Harmony segments at all.
pub fn extract_output(raw: &str) -> String {
    Extractor::default().extract(raw).into_text()
}
