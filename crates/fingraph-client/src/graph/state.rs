use fingraph_core::{AccountId, AnalysisResult, Link, SuspiciousAccount};

use crate::graph::filter::{FilterMode, FilterSelection, PatternFilter, RingFilter};
use crate::graph::project::{self, ProjectedGraph};
use crate::graph::ring::{self, RingDetail};
use crate::net::{Incoming, IncomingKind};

/// Detail-panel payload when a node is selected while a ring filter is
/// active.
pub struct RingPanel<'a> {
    pub detail: RingDetail<'a>,
    pub transactions: Vec<&'a Link>,
}

#[derive(Default)]
pub struct SessionState {
    pub result: Option<AnalysisResult>,
    selection: FilterSelection,
    pub projected: ProjectedGraph,
    // Bumped on every recompute; the renderer discards stale layout state
    // when it changes.
    pub revision: u64,
    pub selected: Option<AccountId>,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl SessionState {
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn clear(&mut self) {
        *self = Self {
            // Monotonic across clears so the renderer still resets.
            revision: self.revision + 1,
            ..Self::default()
        };
    }

    // ----- Apply upload events -----
    pub fn apply(&mut self, inc: Incoming) {
        match inc.kind {
            IncomingKind::Started => {
                self.loading = true;
                self.last_error = None;
            }
            IncomingKind::Completed(result) => {
                // Replaced wholesale; a stale ring or pattern selection from
                // the previous result must not dangle.
                self.result = Some(*result);
                self.selection = FilterSelection::default();
                self.selected = None;
                self.loading = false;
                self.last_error = None;
                self.recompute();
            }
            IncomingKind::Failed(msg) => {
                tracing::warn!(endpoint = %inc.endpoint, error = %msg, "analysis upload failed");
                self.loading = false;
                self.last_error = Some(msg);
            }
        }
    }

    // ----- Filter transitions -----
    pub fn show_all(&mut self) {
        self.selection.show_all();
        self.recompute();
    }

    pub fn set_filter_mode(&mut self, mode: FilterMode) {
        self.selection.set_mode(mode);
        self.recompute();
    }

    pub fn set_ring_filter(&mut self, ring: RingFilter) {
        self.selection.set_ring(ring);
        self.recompute();
    }

    pub fn set_pattern_filter(&mut self, pattern: PatternFilter) {
        self.selection.set_pattern(pattern);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.projected = match &self.result {
            Some(result) => project::project(result, &self.selection),
            None => ProjectedGraph::default(),
        };
        if let Some(id) = &self.selected {
            if !self.projected.nodes.iter().any(|n| &n.id == id) {
                self.selected = None;
            }
        }
        self.revision += 1;
    }

    // ----- Node selection -----
    pub fn select_node(&mut self, id: AccountId) -> bool {
        if self.projected.nodes.iter().any(|n| n.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_details(&self) -> Option<&SuspiciousAccount> {
        let id = self.selected.as_ref()?;
        self.projected
            .nodes
            .iter()
            .find(|n| &n.id == id)?
            .details
            .as_ref()
    }

    pub fn ring_panel(&self) -> Option<RingPanel<'_>> {
        self.selected.as_ref()?;
        let result = self.result.as_ref()?;
        let RingFilter::Ring(ring_id) = self.selection.ring() else {
            return None;
        };
        let detail = ring::resolve_ring(result, ring_id)?;
        let transactions = ring::ring_transactions(result, ring_id);
        Some(RingPanel {
            detail,
            transactions,
        })
    }
}
