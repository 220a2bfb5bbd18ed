use fingraph_core::AnalysisResult;

#[derive(Debug, Clone)]
pub struct Incoming {
    pub endpoint: String,
    pub kind: IncomingKind,
}

#[derive(Debug, Clone)]
pub enum IncomingKind {
    Started,
    Completed(Box<AnalysisResult>),
    Failed(String),
}

impl Incoming {
    pub fn started(endpoint: String) -> Self {
        Self {
            endpoint,
            kind: IncomingKind::Started,
        }
    }

    pub fn completed(endpoint: String, result: AnalysisResult) -> Self {
        Self {
            endpoint,
            kind: IncomingKind::Completed(Box::new(result)),
        }
    }

    pub fn failed(endpoint: String, msg: String) -> Self {
        Self {
            endpoint,
            kind: IncomingKind::Failed(msg),
        }
    }
}
