use fingraph_core::{AccountId, AnalysisResult, FraudPattern, Link, RingId};
use std::collections::HashSet;

/// Detail-panel payload for one fraud ring. Members keep the service's
/// display order; the leader is the member with the highest suspicion score.
#[derive(Debug, Clone, PartialEq)]
pub struct RingDetail<'a> {
    pub leader: Option<&'a AccountId>,
    pub members: &'a [AccountId],
    pub pattern: FraudPattern,
}

pub fn resolve_ring<'a>(result: &'a AnalysisResult, ring_id: &RingId) -> Option<RingDetail<'a>> {
    let ring = result.fraud_rings.iter().find(|r| &r.ring_id == ring_id)?;

    // Strict > against the running maximum: the first member to reach the
    // top score wins ties. Members without a detail record never lead.
    let mut leader: Option<&AccountId> = None;
    let mut max_score = f64::NEG_INFINITY;
    for member in &ring.member_accounts {
        let detail = result
            .suspicious_accounts
            .iter()
            .find(|acc| &acc.account_id == member);
        if let Some(detail) = detail {
            if detail.suspicion_score > max_score {
                max_score = detail.suspicion_score;
                leader = Some(member);
            }
        }
    }

    Some(RingDetail {
        leader,
        members: &ring.member_accounts,
        pattern: ring.pattern_type,
    })
}

/// Every raw link internal to the ring, in source order. Read-only borrows:
/// the held result's links are never cloned or handed to a mutating consumer
/// here.
pub fn ring_transactions<'a>(result: &'a AnalysisResult, ring_id: &RingId) -> Vec<&'a Link> {
    let Some(graph) = result.graph.as_ref() else {
        return Vec::new();
    };
    let Some(ring) = result.fraud_rings.iter().find(|r| &r.ring_id == ring_id) else {
        return Vec::new();
    };

    let members: HashSet<&AccountId> = ring.member_accounts.iter().collect();
    graph
        .links
        .iter()
        .filter(|link| {
            members.contains(link.source.account_id()) && members.contains(link.target.account_id())
        })
        .collect()
}
