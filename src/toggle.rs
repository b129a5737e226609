//! Card expand/collapse state.
//!
//! Each card carries one "expanded" flag. A click on a card header flips
//! that card's flag and leaves the other four alone. The state travels with
//! every request (as the `open` query parameter) so each browser tab keeps
//! its own cards open independently.

use crate::error::Result;
use crate::models::{PerView, ViewId};

/// The five expanded flags, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardState(PerView<bool>);

impl CardState {
    /// Every card collapsed.
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn is_open(&self, view: ViewId) -> bool {
        self.0[view]
    }

    /// Apply one click event.
    ///
    /// With no trigger the result is all collapsed, whatever the prior state.
    pub fn toggle(self, trigger: Option<ViewId>) -> Self {
        let Some(view) = trigger else {
            return Self::closed();
        };

        let mut next = self;
        next.0[view] = !next.0[view];
        next
    }

    /// Flags as a plain tuple-like array.
    pub fn flags(&self) -> [bool; 5] {
        *self.0.values()
    }

    /// Comma-separated ids of the open cards, or `None` when all are closed.
    pub fn encode(&self) -> Option<String> {
        let open: Vec<&str> = self
            .0
            .iter()
            .filter(|(_, open)| **open)
            .map(|(view, _)| view.id())
            .collect();

        if open.is_empty() {
            None
        } else {
            Some(open.join(","))
        }
    }

    /// Parse the `open` query parameter. Unknown ids are rejected.
    pub fn decode(open: Option<&str>) -> Result<Self> {
        let mut state = Self::closed();

        for id in open.unwrap_or("").split(',').map(str::trim) {
            if id.is_empty() {
                continue;
            }
            let view: ViewId = id.parse()?;
            state.0[view] = true;
        }

        Ok(state)
    }
}
