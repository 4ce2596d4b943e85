pub mod backend_kind;
pub mod score_input;
pub mod score_variant;
pub mod weights;

pub use backend_kind::BackendKind;
pub use score_input::{ScoreInput, ScoreShape};
pub use score_variant::ScoreVariant;
pub use weights::Weights;
