//! # foresight-session
//!
//! The entry point a host drives: one [`DecisionSession`] per user owns the
//! baseline model, accepts authoring updates and slider moves, and re-runs the
//! whole pipeline on demand. Every result handed out is an owned snapshot.

pub mod session;

pub use session::DecisionSession;
