// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Pantry integration tests.
//!
//! Provides mock collaborators and a test harness for fast, deterministic,
//! CI-runnable tests without Telegram or any model service.
//!
//! # Components
//!
//! - [`MockTransport`] - chat transport with event injection and outbound capture
//! - [`MockLanguageModel`] - scripted language model
//! - [`MockSpeech`] / [`MockReceiptAnalyzer`] - scripted media collaborators
//! - [`TestHarness`] - an orchestrator wired over the mocks and `MemoryStore`

pub mod harness;
pub mod mock_media;
pub mod mock_model;
pub mod mock_transport;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_media::{MockReceiptAnalyzer, MockSpeech};
pub use mock_model::MockLanguageModel;
pub use mock_transport::{MockTransport, Outbound};
