//! Prompt builders and the canned reply template

use crate::core::constants::reply::{DEFAULT_CUSTOMER_NAME, EXCERPT_CHARS};

/// Prompt asking the model for a translation and nothing else
pub fn translation_prompt(text: &str, target_language: &str) -> String {
    format!(
        "You are a high quality translator. Translate the text below into clear natural \
         {target_language} and output ONLY the translation.\n\n\
         Text:\n{text}\n\nTranslate into {target_language}:"
    )
}

/// Prompt asking the model for a short support reply
pub fn reply_prompt(translated_text: &str, name: &str) -> String {
    let mut prompt = String::from(
        "You are an empathetic customer support agent. Using the message below, write a \
         concise and polite reply (3-6 sentences). Ask clarifying questions if needed and \
         suggest next steps.",
    );
    let name = name.trim();
    if !name.is_empty() {
        prompt.push_str(&format!(" Address the customer as {name}."));
    }
    prompt.push_str(&format!("\n\nCustomer message:\n{translated_text}\n\nReply:"));
    prompt
}

/// Leading `max_chars` characters of `text`
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Name to greet, falling back to the generic customer name
pub fn display_name(name: &str) -> &str {
    let name = name.trim();
    if name.is_empty() {
        DEFAULT_CUSTOMER_NAME
    } else {
        name
    }
}

/// Template reply used when no model is available
pub fn canned_reply(translated_text: &str, name: &str) -> String {
    format!(
        "Hi {}, thanks for reaching out. We received your message: \"{}...\" \
         We'll get back within 24 hours.",
        display_name(name),
        excerpt(translated_text, EXCERPT_CHARS)
    )
}
