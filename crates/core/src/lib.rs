//! medicue-core: lab report analysis pipeline
//!
//! Turns free-form lab report text into classified findings, plain-language
//! explanations, a risk score and an aggregate analysis. Everything here is
//! synchronous and free of I/O; the HTTP service lives in `medicue-server`.

pub mod alerts;
pub mod analysis;
pub mod capability;
pub mod classify;
pub mod error;
pub mod explain;
pub mod extract;
pub mod ingest;
pub mod narrative;
pub mod outcome;
pub mod parameter;
pub mod patient;
pub mod population;
pub mod predictions;
pub mod risk;
pub mod samples;

pub use analysis::{OverallStatus, ReportAnalysis, analyze};
pub use capability::ServiceCapabilities;
pub use classify::{ClassifiedFinding, Severity, Status};
pub use error::ReportError;
pub use ingest::{ReportText, TextSource, Upload};
pub use outcome::{ErrorCode, ErrorOutcome};
pub use parameter::{Category, Parameter};
pub use patient::{Gender, Patient};
pub use risk::{RiskLevel, RiskScore};
pub use samples::SampleReport;
