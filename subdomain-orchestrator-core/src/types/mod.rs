//! Core domain types.

mod config;
mod content;
mod request;
mod result;
mod subdomain;

pub use config::OrchestratorConfig;
pub use content::{GeneratedContent, SiteConfig, ThemeColors};
pub use request::{CreationRequest, RequestContext};
pub use result::{
    CreationResult, CreationStep, DeletionPreview, DeletionResult, StepReport, SubdomainHistory,
    SubdomainPage,
};
pub use subdomain::{
    CreationLogEntry, DeletionOutcome, DeletionRecord, NewSubdomain, StatusFilter, StepStatus,
    Subdomain, SubdomainStatus,
};
