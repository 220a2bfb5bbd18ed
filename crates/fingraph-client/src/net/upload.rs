use crate::net::Incoming;
use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use fingraph_core::{AnalysisResponse, AnalysisResult};
use std::path::{Path, PathBuf};

/// One-shot upload on its own thread. No retry, no timeout, no cancellation:
/// a second upload racing this one is resolved by whichever completion the
/// session applies last.
pub fn spawn_upload(endpoint: String, csv_path: PathBuf, tx: Sender<Incoming>) {
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
        rt.block_on(async move {
            let _ = tx.send(Incoming::started(endpoint.clone()));
            match run(&endpoint, &csv_path).await {
                Ok(result) => {
                    let _ = tx.send(Incoming::completed(endpoint.clone(), result));
                }
                Err(e) => {
                    let _ = tx.send(Incoming::failed(endpoint.clone(), format!("{e:#}")));
                }
            }
        });
    });
}

async fn run(endpoint: &str, csv_path: &Path) -> Result<AnalysisResult> {
    let bytes = tokio::fs::read(csv_path)
        .await
        .with_context(|| format!("read {}", csv_path.display()))?;
    let file_name = csv_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("transactions.csv")
        .to_string();

    tracing::info!(endpoint, file = %csv_path.display(), bytes = bytes.len(), "uploading csv");

    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("text/csv")
        .context("build multipart part")?;
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = reqwest::Client::new()
        .post(endpoint)
        .multipart(form)
        .send()
        .await
        .with_context(|| format!("post {endpoint}"))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("analysis service returned HTTP {status}");
    }

    // The service reports input problems inside a 200 body.
    match response
        .json::<AnalysisResponse>()
        .await
        .context("decode analysis response")?
    {
        AnalysisResponse::Error(err) => anyhow::bail!("analysis rejected: {}", err.error),
        AnalysisResponse::Result(result) => {
            tracing::info!(
                accounts = result.summary.total_accounts_analyzed,
                flagged = result.summary.suspicious_accounts_flagged,
                rings = result.summary.fraud_rings_detected,
                "analysis complete"
            );
            Ok(*result)
        }
    }
}
