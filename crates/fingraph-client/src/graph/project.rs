use fingraph_core::{AccountId, AnalysisResult, LinkEnd, SuspiciousAccount};
use std::collections::{HashMap, HashSet};

use crate::graph::filter::{FilterMode, FilterSelection, PatternFilter, RingFilter};

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedNode {
    pub id: AccountId,
    pub suspicious: bool,
    pub details: Option<SuspiciousAccount>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedLink {
    pub source: LinkEnd,
    pub target: LinkEnd,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedGraph {
    pub nodes: Vec<ProjectedNode>,
    pub links: Vec<ProjectedLink>,
}

/// Derives the node/link subset to display for `selection`. Pure: identical
/// inputs yield identical membership, and every call hands out fresh link
/// values so the renderer can rewrite endpoints without touching the held
/// result.
pub fn project(result: &AnalysisResult, selection: &FilterSelection) -> ProjectedGraph {
    let Some(graph) = result.graph.as_ref() else {
        return ProjectedGraph::default();
    };

    let details: HashMap<&AccountId, &SuspiciousAccount> = result
        .suspicious_accounts
        .iter()
        .map(|acc| (&acc.account_id, acc))
        .collect();

    let mut nodes: Vec<ProjectedNode> = graph
        .nodes
        .iter()
        .map(|id| {
            let detail = details.get(id).copied();
            ProjectedNode {
                id: id.clone(),
                suspicious: detail.is_some(),
                details: detail.cloned(),
            }
        })
        .collect();

    let mut links: Vec<ProjectedLink> = graph
        .links
        .iter()
        .map(|link| ProjectedLink {
            source: link.source.clone(),
            target: link.target.clone(),
            timestamp: link.timestamp.clone(),
        })
        .collect();

    // Exactly one reduction applies; the selection keeps the slots mutually
    // exclusive.
    match selection.mode() {
        FilterMode::Suspicious => {
            nodes.retain(|n| n.suspicious);
            let allowed: HashSet<&AccountId> = nodes.iter().map(|n| &n.id).collect();
            retain_links(&mut links, &allowed);
        }
        FilterMode::Normal => {
            nodes.retain(|n| !n.suspicious);
            let allowed: HashSet<&AccountId> = nodes.iter().map(|n| &n.id).collect();
            retain_links(&mut links, &allowed);
        }
        FilterMode::All => {
            if let RingFilter::Ring(ring_id) = selection.ring() {
                // An id that matches no ring is a defined no-op: full graph.
                if let Some(ring) = result.fraud_rings.iter().find(|r| &r.ring_id == ring_id) {
                    let allowed: HashSet<&AccountId> = ring.member_accounts.iter().collect();
                    nodes.retain(|n| allowed.contains(&n.id));
                    retain_links(&mut links, &allowed);
                }
            } else if let PatternFilter::Pattern(pattern) = selection.pattern() {
                let allowed: HashSet<&AccountId> = result
                    .fraud_rings
                    .iter()
                    .filter(|r| r.pattern_type == *pattern)
                    .flat_map(|r| r.member_accounts.iter())
                    .collect();
                nodes.retain(|n| allowed.contains(&n.id));
                retain_links(&mut links, &allowed);
            }
        }
    }

    ProjectedGraph { nodes, links }
}

fn retain_links(links: &mut Vec<ProjectedLink>, allowed: &HashSet<&AccountId>) {
    links.retain(|link| {
        allowed.contains(link.source.account_id()) && allowed.contains(link.target.account_id())
    });
}
