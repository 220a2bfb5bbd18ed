use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RingId(pub String);

/// A link endpoint as it may exist at any point in the session: the service
/// sends bare account ids, but a force-layout renderer rewrites endpoints in
/// place to resolved node objects. Go through [`LinkEnd::account_id`] before
/// any comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum LinkEnd {
    Id(AccountId),
    Resolved { id: AccountId },
}

impl LinkEnd {
    pub fn account_id(&self) -> &AccountId {
        match self {
            LinkEnd::Id(id) => id,
            LinkEnd::Resolved { id } => id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Link {
    pub source: LinkEnd,
    pub target: LinkEnd,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FraudPattern {
    Cycle,
    Smurfing,
    ShellChain,
}

impl FraudPattern {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cycle => "cycle",
            Self::Smurfing => "smurfing",
            Self::ShellChain => "shell_chain",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub total_accounts_analyzed: u64,
    pub suspicious_accounts_flagged: u64,
    pub fraud_rings_detected: u64,
    pub processing_time_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuspiciousAccount {
    pub account_id: AccountId,
    pub suspicion_score: f64,
    pub detected_patterns: Vec<String>,
    // Older service builds omit the ring membership fields.
    #[serde(default, rename = "ring_id")]
    pub ring_ids: Vec<RingId>,
    #[serde(default)]
    pub ring_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FraudRing {
    pub ring_id: RingId,
    pub pattern_type: FraudPattern,
    pub member_accounts: Vec<AccountId>,
    pub member_count: u64,
    pub risk_score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphPayload {
    pub nodes: Vec<AccountId>,
    pub links: Vec<Link>,
    #[serde(default)]
    pub account_ring_map: BTreeMap<AccountId, Vec<RingId>>,
}

/// One analysis of one uploaded file. Held read-only for the session and
/// replaced wholesale when a new file is analyzed, never merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub summary: Summary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphPayload>,
    #[serde(default)]
    pub suspicious_accounts: Vec<SuspiciousAccount>,
    #[serde(default)]
    pub fraud_rings: Vec<FraudRing>,
    // Top-level keys this client does not model; carried so the export
    // document reproduces the held result unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceError {
    pub error: String,
}

/// The service reports input problems as an HTTP 200 body `{"error": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Error(ServiceError),
    Result(Box<AnalysisResult>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn link_end_decodes_bare_id_and_resolved_reference() {
        let bare: LinkEnd = serde_json::from_value(json!("ACC_001")).expect("bare id");
        let resolved: LinkEnd =
            serde_json::from_value(json!({ "id": "ACC_001", "x": 3.5, "y": -1.0 }))
                .expect("resolved reference");

        assert_eq!(bare.account_id().0, "ACC_001");
        assert_eq!(resolved.account_id().0, "ACC_001");
    }

    #[test]
    fn analysis_result_parses_service_payload() {
        let payload = json!({
            "summary": {
                "total_accounts_analyzed": 4,
                "suspicious_accounts_flagged": 1,
                "fraud_rings_detected": 1,
                "processing_time_seconds": 0.42
            },
            "graph": {
                "nodes": ["A", "B"],
                "links": [
                    { "source": "A", "target": "B", "timestamp": "2024-01-01 09:00:00" }
                ],
                "account_ring_map": { "A": ["RING_001"], "B": ["RING_001"] }
            },
            "suspicious_accounts": [
                {
                    "account_id": "A",
                    "suspicion_score": 48.0,
                    "detected_patterns": ["cycle"],
                    "ring_id": ["RING_001"],
                    "ring_count": 1
                }
            ],
            "fraud_rings": [
                {
                    "ring_id": "RING_001",
                    "pattern_type": "cycle",
                    "member_accounts": ["A", "B"],
                    "member_count": 2,
                    "risk_score": 95.0
                }
            ]
        });

        let result: AnalysisResult = serde_json::from_value(payload).expect("result parsed");
        let graph = result.graph.as_ref().expect("graph present");

        assert_eq!(result.summary.total_accounts_analyzed, 4);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.links[0].source.account_id().0, "A");
        assert_eq!(
            graph.account_ring_map[&AccountId("B".into())],
            vec![RingId("RING_001".into())]
        );
        assert_eq!(result.fraud_rings[0].pattern_type, FraudPattern::Cycle);
        assert_eq!(result.suspicious_accounts[0].ring_count, 1);
        assert!(result.extra.is_empty());
    }

    #[test]
    fn suspicious_account_parses_without_ring_membership_fields() {
        let acc: SuspiciousAccount = serde_json::from_value(json!({
            "account_id": "A",
            "suspicion_score": 60.0,
            "detected_patterns": ["smurfing"]
        }))
        .expect("account parsed");

        assert!(acc.ring_ids.is_empty());
        assert_eq!(acc.ring_count, 0);
    }

    #[test]
    fn error_body_decodes_as_service_error() {
        let response: AnalysisResponse =
            serde_json::from_value(json!({ "error": "missing column: sender_id" }))
                .expect("response parsed");

        match response {
            AnalysisResponse::Error(err) => {
                assert_eq!(err.error, "missing column: sender_id");
            }
            AnalysisResponse::Result(_) => panic!("expected error variant"),
        }
    }

    #[test]
    fn unmodeled_top_level_keys_are_retained() {
        let payload = json!({
            "summary": {
                "total_accounts_analyzed": 0,
                "suspicious_accounts_flagged": 0,
                "fraud_rings_detected": 0,
                "processing_time_seconds": 0.01
            },
            "model_version": "2024-06"
        });

        let result: AnalysisResult = serde_json::from_value(payload).expect("result parsed");
        assert_eq!(result.extra["model_version"], json!("2024-06"));
    }
}
