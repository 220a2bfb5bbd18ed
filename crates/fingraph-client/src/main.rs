use anyhow::Result;
use std::ffi::OsString;
use std::path::PathBuf;

use fingraph_client::export;
use fingraph_client::graph::filter::{FilterMode, PatternFilter, RingFilter};
use fingraph_client::graph::ring;
use fingraph_client::graph::state::SessionState;
use fingraph_client::net::{self, IncomingKind};
use fingraph_client::util::config;
use fingraph_core::{AnalysisResult, FraudPattern, RingId, Summary};

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

#[derive(Debug, Clone, PartialEq)]
enum FilterArg {
    None,
    Mode(FilterMode),
    Ring(RingId),
    Pattern(FraudPattern),
}

#[derive(Debug, Clone)]
struct ClientArgs {
    csv: PathBuf,
    endpoint: Option<String>,
    export: Option<PathBuf>,
    filter: FilterArg,
}

fn parse_args() -> Result<ClientArgs> {
    parse_args_from(std::env::args_os().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<ClientArgs>
where
    I: IntoIterator<Item = OsString>,
{
    let mut csv: Option<PathBuf> = None;
    let mut endpoint = None;
    let mut export = None;
    let mut filter = FilterArg::None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--endpoint" {
            let Some(value) = args.next() else {
                anyhow::bail!("--endpoint expects a url");
            };
            endpoint = Some(value.to_string_lossy().into_owned());
        } else if arg == "--export" {
            let Some(path) = args.next() else {
                anyhow::bail!("--export expects a path");
            };
            export = Some(PathBuf::from(path));
        } else if arg == "--filter" {
            let Some(value) = args.next() else {
                anyhow::bail!("--filter expects suspicious|normal");
            };
            let mode = match value.to_string_lossy().as_ref() {
                "suspicious" => FilterMode::Suspicious,
                "normal" => FilterMode::Normal,
                other => anyhow::bail!("invalid filter: {other} (expected suspicious|normal)"),
            };
            set_filter(&mut filter, FilterArg::Mode(mode))?;
        } else if arg == "--ring" {
            let Some(value) = args.next() else {
                anyhow::bail!("--ring expects a ring id");
            };
            set_filter(
                &mut filter,
                FilterArg::Ring(RingId(value.to_string_lossy().into_owned())),
            )?;
        } else if arg == "--pattern" {
            let Some(value) = args.next() else {
                anyhow::bail!("--pattern expects cycle|smurfing|shell_chain");
            };
            let pattern = match value.to_string_lossy().as_ref() {
                "cycle" => FraudPattern::Cycle,
                "smurfing" => FraudPattern::Smurfing,
                "shell_chain" => FraudPattern::ShellChain,
                other => {
                    anyhow::bail!("invalid pattern: {other} (expected cycle|smurfing|shell_chain)")
                }
            };
            set_filter(&mut filter, FilterArg::Pattern(pattern))?;
        } else if csv.is_none() && !arg.to_string_lossy().starts_with("--") {
            csv = Some(PathBuf::from(arg));
        } else {
            anyhow::bail!("unknown argument: {:?}", arg);
        }
    }

    let Some(csv) = csv else {
        anyhow::bail!("expected a transaction csv path");
    };
    Ok(ClientArgs {
        csv,
        endpoint,
        export,
        filter,
    })
}

fn set_filter(slot: &mut FilterArg, value: FilterArg) -> Result<()> {
    if *slot != FilterArg::None {
        anyhow::bail!("at most one of --filter, --ring, --pattern may be given");
    }
    *slot = value;
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = parse_args()?;
    let cfg = config::load_or_default();
    let endpoint = args.endpoint.clone().unwrap_or(cfg.endpoint);

    // Input-absent failures stay local; no request goes out.
    anyhow::ensure!(
        args.csv.is_file(),
        "no transaction csv at {}",
        args.csv.display()
    );

    let (tx, rx) = crossbeam_channel::unbounded();
    net::spawn_upload(endpoint, args.csv.clone(), tx);

    let mut session = SessionState::default();
    for inc in rx.iter() {
        let finished = !matches!(inc.kind, IncomingKind::Started);
        session.apply(inc);
        if finished {
            break;
        }
    }

    if let Some(err) = session.last_error.as_deref() {
        anyhow::bail!("analysis failed: {err}");
    }
    {
        let Some(result) = session.result.as_ref() else {
            anyhow::bail!("analysis produced no result");
        };
        print_summary(&result.summary);
        print_rings(result);
    }

    match &args.filter {
        FilterArg::None => {}
        FilterArg::Mode(mode) => session.set_filter_mode(*mode),
        FilterArg::Ring(ring_id) => session.set_ring_filter(RingFilter::Ring(ring_id.clone())),
        FilterArg::Pattern(pattern) => {
            session.set_pattern_filter(PatternFilter::Pattern(*pattern))
        }
    }

    let flagged = session.projected.nodes.iter().filter(|n| n.suspicious).count();
    println!(
        "showing {} nodes ({} suspicious), {} links",
        session.projected.nodes.len(),
        flagged,
        session.projected.links.len()
    );

    if let FilterArg::Ring(ring_id) = &args.filter {
        if let Some(result) = session.result.as_ref() {
            print_ring_intelligence(result, ring_id);
        }
    }

    if let Some(path) = &args.export {
        if let Some(result) = session.result.as_ref() {
            export::write_export(result, path)?;
            println!("exported {}", path.display());
        }
    }

    Ok(())
}

fn print_summary(summary: &Summary) {
    println!("accounts analyzed: {}", summary.total_accounts_analyzed);
    println!("suspicious accounts: {}", summary.suspicious_accounts_flagged);
    println!("fraud rings: {}", summary.fraud_rings_detected);
    println!("processing time: {}s", summary.processing_time_seconds);
}

fn print_rings(result: &AnalysisResult) {
    if result.fraud_rings.is_empty() {
        println!("no fraud rings detected");
        return;
    }
    println!("{:<12} {:<12} {:>7} {:>6}  members", "ring", "pattern", "count", "risk");
    for ring in &result.fraud_rings {
        let members: Vec<&str> = ring.member_accounts.iter().map(|m| m.0.as_str()).collect();
        println!(
            "{:<12} {:<12} {:>7} {:>6.1}  {}",
            ring.ring_id.0,
            ring.pattern_type.as_str(),
            ring.member_count,
            ring.risk_score,
            members.join(", ")
        );
    }
}

fn print_ring_intelligence(result: &AnalysisResult, ring_id: &RingId) {
    let Some(detail) = ring::resolve_ring(result, ring_id) else {
        println!("ring {} not present in this result", ring_id.0);
        return;
    };

    println!("ring type: {}", detail.pattern.as_str());
    match detail.leader {
        Some(leader) => println!("ring leader: {}", leader.0),
        None => println!("ring leader: unknown"),
    }
    let members: Vec<&str> = detail.members.iter().map(|m| m.0.as_str()).collect();
    println!("members: {}", members.join(", "));

    let transactions = ring::ring_transactions(result, ring_id);
    if transactions.is_empty() {
        println!("no intra-ring transactions found");
        return;
    }
    for tx in transactions {
        println!(
            "  {} -> {}  {}",
            tx.source.account_id().0,
            tx.target.account_id().0,
            tx.timestamp
        );
    }
}
