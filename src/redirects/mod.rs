//! Redirect following and classification

pub mod analysis;
pub mod classifier;
pub mod follower;

pub use analysis::{RedirectAnalysis, RedirectAnalyzer, RedirectResult, RedirectSummary, RedirectedTool};
pub use classifier::{RedirectKind, classify, hosts_related};
pub use follower::{Hop, RedirectChain, RedirectFollower};
