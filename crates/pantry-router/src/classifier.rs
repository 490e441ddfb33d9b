// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification for normalized text.
//!
//! Classification happens in two pure steps. [`IntentClassifier::route`]
//! settles commands, slot replies and trivially short messages on its own;
//! everything else needs a product-list detection from the model, which
//! [`IntentClassifier::finish`] grades against the configured thresholds.

use pantry_config::model::ClassifierConfig;
use pantry_core::error::PantryError;
use pantry_core::types::ProductListDetection;
use pantry_state::{Slot, TEXT_SLOTS};
use tracing::{debug, warn};

const COMMAND_SIGIL: char = '/';

/// What a text message means.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// `/name args`. Commands outrank everything.
    Command { name: String, args: String },
    /// Free text consumed by the active workflow in `slot`.
    SlotReply { slot: Slot, text: String },
    ProductListCandidate(ProductListDetection),
    /// A negative detection close enough to earn a gentle nudge.
    LowConfidenceProductList(ProductListDetection),
    Chatter,
}

impl Intent {
    /// Short label used for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Command { .. } => "command",
            Intent::SlotReply { .. } => "slot_reply",
            Intent::ProductListCandidate(_) => "product_list",
            Intent::LowConfidenceProductList(_) => "low_confidence",
            Intent::Chatter => "chatter",
        }
    }
}

/// An intent plus the workflow slots the message made stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub intent: Intent,
    /// Active workflow slots that do not accept text. The caller clears them
    /// before acting on the intent.
    pub stale_slots: Vec<Slot>,
}

/// Outcome of the model-free routing step.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Decided(Classification),
    NeedsDetection { stale_slots: Vec<Slot> },
}

#[derive(Debug, Clone)]
pub struct IntentClassifier {
    candidate_threshold: f64,
    nudge_threshold: f64,
}

impl IntentClassifier {
    pub fn new(candidate_threshold: f64, nudge_threshold: f64) -> Self {
        Self {
            candidate_threshold,
            nudge_threshold,
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.candidate_threshold, config.nudge_threshold)
    }

    /// Classifies what can be decided without the model.
    pub fn route(&self, text: &str, active: &[Slot]) -> Stage {
        let trimmed = text.trim();

        if let Some((name, args)) = parse_command(trimmed) {
            return Stage::Decided(Classification {
                intent: Intent::Command { name, args },
                stale_slots: Vec::new(),
            });
        }

        if let Some(slot) = TEXT_SLOTS.iter().copied().find(|s| active.contains(s)) {
            debug!(%slot, "text routed to active slot");
            return Stage::Decided(Classification {
                intent: Intent::SlotReply {
                    slot,
                    text: trimmed.to_string(),
                },
                stale_slots: Vec::new(),
            });
        }

        let stale_slots: Vec<Slot> = active
            .iter()
            .copied()
            .filter(|s| s.is_workflow() && !s.accepts_text())
            .collect();

        if trimmed.chars().count() <= 1 {
            return Stage::Decided(Classification {
                intent: Intent::Chatter,
                stale_slots,
            });
        }

        Stage::NeedsDetection { stale_slots }
    }

    /// Maps a detection onto candidate, nudge or chatter.
    pub fn grade(&self, detection: ProductListDetection) -> Intent {
        if detection.is_product_list && detection.confidence >= self.candidate_threshold {
            Intent::ProductListCandidate(detection)
        } else if !detection.is_product_list
            && detection.confidence >= self.nudge_threshold
            && detection.confidence < self.candidate_threshold
        {
            Intent::LowConfidenceProductList(detection)
        } else {
            Intent::Chatter
        }
    }

    /// Completes a [`Stage::NeedsDetection`]. A failed detection is chatter.
    pub fn finish(
        &self,
        stale_slots: Vec<Slot>,
        detection: Result<ProductListDetection, PantryError>,
    ) -> Classification {
        let intent = match detection {
            Ok(detection) => self.grade(detection),
            Err(e) => {
                warn!(error = %e, "product-list detection failed, treating as chatter");
                Intent::Chatter
            }
        };
        Classification {
            intent,
            stale_slots,
        }
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

/// Splits `/name@bot args` into a lower-cased name and trimmed args.
pub fn parse_command(text: &str) -> Option<(String, String)> {
    let rest = text.trim().strip_prefix(COMMAND_SIGIL)?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };
    let name = head.split('@').next().unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    Some((name.to_lowercase(), args.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(is_list: bool, confidence: f64) -> ProductListDetection {
        ProductListDetection::new(is_list, confidence)
    }

    fn decided(stage: Stage) -> Classification {
        match stage {
            Stage::Decided(c) => c,
            other => panic!("expected a decision, got {other:?}"),
        }
    }

    #[test]
    fn commands_outrank_active_slots() {
        let c = IntentClassifier::default();
        let got = decided(c.route("/lists", &[Slot::AddingItemToList]));
        assert_eq!(
            got.intent,
            Intent::Command {
                name: "lists".into(),
                args: String::new()
            }
        );
    }

    #[test]
    fn command_parsing_strips_bot_suffix() {
        assert_eq!(
            parse_command("/Authorize@PantryBot 12345 "),
            Some(("authorize".into(), "12345".into()))
        );
        assert_eq!(parse_command("/"), None);
        assert_eq!(parse_command("milk"), None);
    }

    #[test]
    fn slot_priority_is_adding_then_viewing() {
        let c = IntentClassifier::default();
        let got = decided(c.route(
            " eggs ",
            &[Slot::CreatingListForFamily, Slot::ViewingList, Slot::AddingItemToList],
        ));
        assert_eq!(
            got.intent,
            Intent::SlotReply {
                slot: Slot::AddingItemToList,
                text: "eggs".into()
            }
        );
    }

    #[test]
    fn non_text_workflow_slots_go_stale() {
        let c = IntentClassifier::default();
        let stage = c.route(
            "milk, bread",
            &[
                Slot::DuplicateResolution,
                Slot::ProductListSelection,
                Slot::LatestBotMessageId,
            ],
        );
        match stage {
            Stage::NeedsDetection { stale_slots } => {
                assert!(stale_slots.contains(&Slot::DuplicateResolution));
                assert!(stale_slots.contains(&Slot::ProductListSelection));
                assert!(!stale_slots.contains(&Slot::LatestBotMessageId));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn single_character_is_chatter() {
        let c = IntentClassifier::default();
        assert_eq!(decided(c.route("k", &[])).intent, Intent::Chatter);
    }

    #[test]
    fn grading_bands() {
        let c = IntentClassifier::default();
        assert!(matches!(
            c.grade(detection(true, 0.5)),
            Intent::ProductListCandidate(_)
        ));
        assert_eq!(c.grade(detection(true, 0.49)), Intent::Chatter);
        assert!(matches!(
            c.grade(detection(false, 0.35)),
            Intent::LowConfidenceProductList(_)
        ));
        assert_eq!(c.grade(detection(false, 0.29)), Intent::Chatter);
        assert_eq!(c.grade(detection(false, 0.5)), Intent::Chatter);
    }

    #[test]
    fn detection_failure_is_chatter() {
        let c = IntentClassifier::default();
        let got = c.finish(
            vec![Slot::DuplicateResolution],
            Err(PantryError::Timeout {
                duration: std::time::Duration::from_secs(20),
            }),
        );
        assert_eq!(got.intent, Intent::Chatter);
        assert_eq!(got.stale_slots, vec![Slot::DuplicateResolution]);
    }

    #[test]
    fn grading_is_deterministic() {
        let c = IntentClassifier::new(0.6, 0.2);
        let d = detection(true, 0.7);
        assert_eq!(c.grade(d.clone()), c.grade(d));
    }
}
