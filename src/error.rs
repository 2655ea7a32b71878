// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fatal error taxonomy.
//!
//! Transient sampling failures (TIR, grazing incidence, ray escape, ...) are
//! never errors here; they are `Option::None`/zero-contribution returns
//! threaded through `run_once`. Only conditions that indicate a
//! misconfigured scene or renderer surface as `RenderError`.

use std::error::Error;
use std::fmt;

/// Fatal, caller-visible failures. None of these can occur from a correctly
/// configured scene and renderer; all are surfaced rather than silently
/// clamped, since they indicate a modelling or sizing mistake upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A fixed-size arena ran out of room. Only occurs for misconfigured
    /// sample streams (§7): a correctly sized arena never exhausts.
    ArenaExhausted {
        requested: usize,
        available: usize,
    },
    /// A ray entered more nested dielectric interfaces than the priority
    /// stack's capacity. Indicates a modelling error in the scene (too many
    /// overlapping transparent volumes along one ray).
    PriorityStackOverflow {
        capacity: usize,
    },
    /// An asset (mesh or image) arrived with inconsistent metadata, e.g. an
    /// index referencing a vertex past `vertex_count`. Raised at
    /// scene-construction time; the core never sees a partial scene.
    InvalidAsset(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::ArenaExhausted { requested, available } => write!(
                f,
                "arena exhausted: requested {} bytes, {} available",
                requested, available
            ),
            RenderError::PriorityStackOverflow { capacity } => write!(
                f,
                "nested-dielectric priority stack overflowed its capacity of {}",
                capacity
            ),
            RenderError::InvalidAsset(msg) => write!(f, "invalid asset: {}", msg),
        }
    }
}

impl Error for RenderError {}

pub type Result<T> = ::std::result::Result<T, RenderError>;
