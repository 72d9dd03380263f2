// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed catalog of the models each provider exposes through the gateway.
//!
//! Model identifiers take the form `provider:name`. Selection is validated
//! against this catalog rather than accepting free-form strings.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// An LLM provider reachable through the gateway.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Provider {
    OpenAi,
    Mistral,
    OpenRouter,
    Mock,
}

/// One selectable model in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelEntry {
    /// Fully qualified identifier sent to the gateway.
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Disabled entries are listed but cannot be selected.
    pub enabled: bool,
}

impl ModelEntry {
    const fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            enabled: true,
        }
    }

    const fn disabled(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            enabled: false,
        }
    }
}

const OPENAI_MODELS: &[ModelEntry] = &[
    ModelEntry::new("openai:gpt-4o-mini", "GPT-4o-Mini"),
    ModelEntry::new("openai:gpt-4o", "GPT-4o"),
    ModelEntry::new("openai:gpt-4-turbo", "GPT-4-Turbo"),
    ModelEntry::new("openai:gpt-3.5-turbo", "GPT-3.5-Turbo"),
    ModelEntry::disabled("openai:gpt-5", "GPT-5 (coming soon)"),
];

const MISTRAL_MODELS: &[ModelEntry] = &[
    ModelEntry::new("mistral:open-mixtral-8x7b", "Mixtral 8×7B"),
    ModelEntry::new("mistral:open-mistral-7b", "Mistral 7B"),
];

const OPENROUTER_MODELS: &[ModelEntry] = &[
    ModelEntry::new("openrouter:llama-free", "Llama 3.1 8B (free)"),
    ModelEntry::new("openrouter:phi3-mini", "Phi-3 Mini (free)"),
    ModelEntry::new("openrouter:mistral-nemo", "Mistral Nemo (free)"),
];

const MOCK_MODELS: &[ModelEntry] = &[ModelEntry::new("mock:gpt-mini", "Mock GPT Mini")];

impl Provider {
    /// All catalog entries for this provider, in display order.
    pub fn models(self) -> &'static [ModelEntry] {
        match self {
            Provider::OpenAi => OPENAI_MODELS,
            Provider::Mistral => MISTRAL_MODELS,
            Provider::OpenRouter => OPENROUTER_MODELS,
            Provider::Mock => MOCK_MODELS,
        }
    }

    /// The first enabled entry, preselected when a session opens.
    pub fn default_model(self) -> Option<&'static ModelEntry> {
        self.models().iter().find(|m| m.enabled)
    }

    /// Looks up an enabled entry by its full identifier.
    pub fn find(self, id: &str) -> Option<&'static ModelEntry> {
        self.models().iter().find(|m| m.enabled && m.id == id)
    }

    /// Resolves the provider owning a `provider:name` identifier.
    pub fn of_model(id: &str) -> Option<Provider> {
        let (prefix, _) = id.split_once(':')?;
        Provider::iter().find(|p| p.to_string() == prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn provider_parses_from_config_strings() {
        assert_eq!(Provider::from_str("openai").unwrap(), Provider::OpenAi);
        assert_eq!(Provider::from_str("Mistral").unwrap(), Provider::Mistral);
        assert_eq!(Provider::from_str("openrouter").unwrap(), Provider::OpenRouter);
        assert!(Provider::from_str("anthropic").is_err());
    }

    #[test]
    fn every_entry_is_prefixed_by_its_provider() {
        for provider in Provider::iter() {
            for entry in provider.models() {
                assert_eq!(Provider::of_model(entry.id), Some(provider), "{}", entry.id);
            }
        }
    }

    #[test]
    fn default_model_is_first_enabled_entry() {
        assert_eq!(
            Provider::OpenAi.default_model().map(|m| m.id),
            Some("openai:gpt-4o-mini")
        );
        assert_eq!(
            Provider::Mistral.default_model().map(|m| m.id),
            Some("mistral:open-mixtral-8x7b")
        );
    }

    #[test]
    fn disabled_entries_cannot_be_found() {
        assert!(Provider::OpenAi.find("openai:gpt-5").is_none());
        assert!(Provider::OpenAi.find("openai:gpt-4o").is_some());
    }

    #[test]
    fn find_rejects_other_providers_models() {
        assert!(Provider::OpenAi.find("mistral:open-mistral-7b").is_none());
    }

    #[test]
    fn of_model_requires_known_prefix() {
        assert_eq!(Provider::of_model("standalone-model"), None);
        assert_eq!(Provider::of_model("acme:thing"), None);
    }
}
