pub mod pair_ctx;
pub mod pair_flow;

pub use pair_ctx::PairCtx;
pub use pair_flow::{PairFlow, PairOutcome};
