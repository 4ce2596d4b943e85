pub mod backend;

pub use backend::IScoreBackend;
