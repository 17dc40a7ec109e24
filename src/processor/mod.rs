pub mod feature_assembler;
pub mod heuristic_overrider;
pub mod product_extractor;
pub mod review_analyzer;
pub mod sentiment;

pub use feature_assembler::*;
pub use heuristic_overrider::*;
pub use product_extractor::*;
pub use review_analyzer::*;
pub use sentiment::*;
