use anyhow::{Context, Result};
use fingraph_core::AnalysisResult;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub const EXPORT_FILE_NAME: &str = "fraud_results.json";

/// The held result minus the `graph` section; every other top-level key
/// passes through unchanged. Pure projection, no network involved.
pub fn export_document(result: &AnalysisResult) -> Result<Value> {
    let mut doc = serde_json::to_value(result).context("serialize analysis result")?;
    if let Value::Object(map) = &mut doc {
        map.remove("graph");
    }
    Ok(doc)
}

pub fn write_export(result: &AnalysisResult, path: &Path) -> Result<()> {
    let doc = export_document(result)?;
    let data = serde_json::to_string_pretty(&doc).context("serialize export document")?;
    fs::write(path, data).with_context(|| format!("write export {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_with_graph() -> AnalysisResult {
        serde_json::from_value(json!({
            "summary": {
                "total_accounts_analyzed": 2,
                "suspicious_accounts_flagged": 1,
                "fraud_rings_detected": 1,
                "processing_time_seconds": 0.05
            },
            "graph": {
                "nodes": ["A", "B"],
                "links": [
                    { "source": "A", "target": "B", "timestamp": "2024-01-01 09:00:00" }
                ]
            },
            "suspicious_accounts": [
                { "account_id": "A", "suspicion_score": 48.0, "detected_patterns": ["cycle"] }
            ],
            "fraud_rings": [
                {
                    "ring_id": "RING_001",
                    "pattern_type": "cycle",
                    "member_accounts": ["A", "B"],
                    "member_count": 2,
                    "risk_score": 95.0
                }
            ],
            "model_version": "2024-06"
        }))
        .expect("result")
    }

    #[test]
    fn export_strips_only_the_graph_key() {
        let result = result_with_graph();
        let doc = export_document(&result).expect("export document");
        let map = doc.as_object().expect("object document");

        assert!(!map.contains_key("graph"));
        assert!(map.contains_key("summary"));
        assert!(map.contains_key("suspicious_accounts"));
        assert!(map.contains_key("fraud_rings"));
        // Keys the client does not model survive the round trip.
        assert_eq!(map["model_version"], json!("2024-06"));
    }

    #[test]
    fn export_leaves_the_held_result_untouched() {
        let result = result_with_graph();
        let before = result.clone();

        export_document(&result).expect("export document");

        assert_eq!(result, before);
        assert!(result.graph.is_some());
    }

    #[test]
    fn write_export_produces_parseable_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(EXPORT_FILE_NAME);
        let result = result_with_graph();

        write_export(&result, &path).expect("write export");

        let data = fs::read_to_string(&path).expect("read export");
        let doc: Value = serde_json::from_str(&data).expect("parse export");
        assert!(doc.get("graph").is_none());
    }
}
