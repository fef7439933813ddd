//! Rewriting the tool data file from a redirect analysis, and checking the result

pub mod fixer;
pub mod verify;

pub use fixer::{
    FixOptions, FixOutcome, FixReport, RedirectFixer, UrlUpdate, apply_rebrands, apply_url_updates,
    clean_recommended_url,
};
pub use verify::{UrlVerifier, VerifyOutcome, VerifyResult};
