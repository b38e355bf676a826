// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Errors reported by the viewport.
///
/// Only construction can fail; everything else degrades to a no-op.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ViewportError {
    /// No host window was supplied.
    #[error("missing required argument: window")]
    MissingWindow,
    /// An event name did not match any [`EventType`](crate::EventType).
    #[error("unknown viewport event type `{0}`")]
    UnknownEventType(String),
}
