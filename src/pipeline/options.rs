//! Processing options selected by the user or configuration

/// Where translation and reply requests are sent first
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendMode {
    /// Call the HTTP backend, falling back to in-process engines on failure
    Remote,
    /// Use the in-process engines only
    Local,
}

/// Preferred translation implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TranslationBackend {
    Auto,
    #[value(name = "openai")]
    OpenAI,
    Local,
}

/// How suggested replies are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ResponseMode {
    /// Model-generated when available, canned otherwise
    Ai,
    /// Always use the canned template
    Canned,
}

impl BackendMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Some(BackendMode::Remote),
            "local" => Some(BackendMode::Local),
            _ => None,
        }
    }
}

impl TranslationBackend {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(TranslationBackend::Auto),
            "openai" | "open-ai" => Some(TranslationBackend::OpenAI),
            "local" => Some(TranslationBackend::Local),
            _ => None,
        }
    }
}

impl ResponseMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ai" | "ai-generated" => Some(ResponseMode::Ai),
            "canned" | "template" => Some(ResponseMode::Canned),
            _ => None,
        }
    }
}

/// Per-query settings for the query processor
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub backend: BackendMode,
    pub translation_backend: TranslationBackend,
    pub response_mode: ResponseMode,
    /// Sampling temperature for generated replies
    pub temperature: f32,
    pub generate_reply: bool,
    pub target_language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!(BackendMode::from_str("Remote"), Some(BackendMode::Remote));
        assert_eq!(
            TranslationBackend::from_str("open-ai"),
            Some(TranslationBackend::OpenAI)
        );
        assert_eq!(ResponseMode::from_str("template"), Some(ResponseMode::Canned));
        assert_eq!(BackendMode::from_str("cloud"), None);
    }
}
