//! Vocabularies loaded once at startup, and the per-action request handler.

use log::info;

use crate::config::DemoConfig;
use crate::error::{Result, ScgError};
use crate::grammar::SemanticControlGrammar;
use crate::model::Model;
use crate::table::{LookupRequest, LookupResult, TableLookup};
use crate::vocab::{LabelVocab, SlotValueVocab};

/// Read-only selection state shared by every request.
#[derive(Debug, Clone)]
pub struct Catalog {
    intents: LabelVocab,
    slot_tags: LabelVocab,
    slot_values: SlotValueVocab,
    lookup: TableLookup,
}

impl Catalog {
    /// Load all three vocabularies. Any failure aborts initialization.
    pub fn load(config: DemoConfig) -> Result<Self> {
        let intents = LabelVocab::load(config.intent_vocab_path())?;
        let slot_tags = LabelVocab::load(config.slot_tag_vocab_path())?;
        let slot_values = SlotValueVocab::load(config.slot_value_vocab_path())?;
        info!(
            "Loaded {} intents, {} slot tags, {} slot value sets from {}",
            intents.len(),
            slot_tags.len(),
            slot_values.len(),
            config.data_dir.display()
        );
        Ok(Self::from_parts(intents, slot_tags, slot_values, config))
    }

    pub fn from_parts(
        intents: LabelVocab,
        slot_tags: LabelVocab,
        slot_values: SlotValueVocab,
        config: DemoConfig,
    ) -> Self {
        Catalog {
            intents,
            slot_tags,
            slot_values,
            lookup: TableLookup::new(config),
        }
    }

    pub fn intents(&self) -> &LabelVocab {
        &self.intents
    }

    pub fn slot_tags(&self) -> &LabelVocab {
        &self.slot_tags
    }

    pub fn slot_values(&self) -> &SlotValueVocab {
        &self.slot_values
    }

    pub fn config(&self) -> &DemoConfig {
        self.lookup.config()
    }

    /// Compose a grammar from a selected intent, which must be in the vocabulary.
    pub fn compose(&self, intent: &str, slots: &str) -> Result<SemanticControlGrammar> {
        if !self.intents.contains(intent) {
            return Err(ScgError::validation(format!("unknown intent '{intent}'")));
        }
        Ok(SemanticControlGrammar::new(intent, slots))
    }

    /// Handle one "Generate" action.
    pub fn generate(
        &self,
        model: Model,
        grammar: &SemanticControlGrammar,
        count: usize,
    ) -> Result<LookupResult> {
        let request = LookupRequest::new(model, grammar.lookup_key(), count);
        self.lookup.lookup(&request)
    }
}
