// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language model access for the Pantry assistant.
//!
//! [`AiGateway`] is what the rest of the workspace talks to. [`OpenAiModel`]
//! is the production [`pantry_core::LanguageModel`].

pub mod cache;
pub mod gateway;
pub mod openai;

pub use gateway::{AiGateway, GatewaySettings, fold_low_confidence};
pub use openai::OpenAiModel;
