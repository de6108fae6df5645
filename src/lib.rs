//! Lexibot: conversational word translation over a bilingual-memory provider.
//! Pipeline: fetch raw matches → score → dedupe → rank → present.

pub mod languages;
pub mod present;
pub mod provider;
pub mod ranking;
pub mod scoring;
pub mod session;
pub mod state_machine;
