//! Verification pipeline services
//!
//! - **consensus_resolver** - aggregates agent verdicts (gateway preferred,
//!   local vote fallback)
//! - **correction_synthesizer** - builds correction text for false statements
//! - **verification_orchestrator** - top-level entry point per statement

pub mod consensus_resolver;
pub mod correction_synthesizer;
pub mod verification_orchestrator;

pub use consensus_resolver::{ConsensusResolver, GatewayClient};
pub use correction_synthesizer::CorrectionSynthesizer;
pub use verification_orchestrator::VerificationOrchestrator;
