// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP clients for the media collaborators: voice transcription and
//! receipt document analysis.

pub mod dates;
pub mod receipts;
pub mod stt;

pub use receipts::{ReceiptClient, ReceiptClientSettings};
pub use stt::SpeechClient;
