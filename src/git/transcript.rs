// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-operation output transcript.

/// Stdout of every invocation made by one operation, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    chunks: Vec<String>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one invocation's stdout.
    pub fn record(&mut self, stdout: impl Into<String>) {
        self.chunks.push(stdout.into());
    }

    /// Number of recorded invocations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// All recorded stdout, concatenated.
    #[must_use]
    pub fn text(&self) -> String {
        self.chunks.concat()
    }
}
