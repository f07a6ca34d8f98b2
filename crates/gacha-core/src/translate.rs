//! Best-effort synopsis translation.
//!
//! Translation never fails the render: any error or timeout hands back the
//! original text untouched.

use std::time::Duration;

use gacha_api::Translator;

/// Appended to a translation whose source was cut at the character budget.
pub const READ_MORE_MARKER: &str = " (...)";

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationPolicy {
    pub enabled: bool,
    /// Maximum number of characters sent to the translation service.
    pub budget_chars: usize,
    pub timeout: Duration,
    pub source_lang: String,
    pub target_lang: String,
}

impl Default for TranslationPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            budget_chars: 500,
            timeout: Duration::from_millis(5500),
            source_lang: "en".to_string(),
            target_lang: "pt".to_string(),
        }
    }
}

/// Result of a translation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// `false` when `text` is the untouched original.
    pub translated: bool,
}

impl Translation {
    fn original(text: &str) -> Self {
        Self {
            text: text.to_string(),
            translated: false,
        }
    }
}

/// Cut `text` to at most `budget` characters. Returns the prefix and whether anything was cut.
pub fn truncate_chars(text: &str, budget: usize) -> (&str, bool) {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}

/// Translate `text` under `policy`, falling back to the original on any failure.
pub async fn translate_synopsis<T: Translator>(
    translator: &T,
    text: &str,
    policy: &TranslationPolicy,
) -> Translation {
    if !policy.enabled || text.trim().is_empty() {
        return Translation::original(text);
    }

    let (fragment, truncated) = truncate_chars(text, policy.budget_chars);
    let request = translator.translate(
        fragment.trim_end(),
        &policy.source_lang,
        &policy.target_lang,
    );

    match tokio::time::timeout(policy.timeout, request).await {
        Ok(Ok(translated)) => {
            let mut text = translated.trim_end().to_string();
            if truncated {
                text.push_str(READ_MORE_MARKER);
            }
            Translation {
                text,
                translated: true,
            }
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "translation failed, keeping original synopsis");
            Translation::original(text)
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = policy.timeout.as_millis() as u64,
                "translation timed out, keeping original synopsis"
            );
            Translation::original(text)
        }
    }
}
