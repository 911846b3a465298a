//! AI drafting helpers for the admin inbox.
//!
//! Text generation runs in a hosted prompt-flow service; this crate is the
//! client for it. [`PromptFlow`] is the seam the API depends on and
//! [`PromptFlowApi`] is the HTTP implementation.

pub mod api;

pub use api::{
    PromptFlow, PromptFlowApi, PromptFlowConfig, PromptFlowError, REFINE_TONE_FLOW, SUMMARIZE_FLOW,
};
