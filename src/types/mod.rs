pub mod analysis;
pub mod asset;
pub mod chart;
pub mod news;
pub mod pattern;
pub mod prediction;
pub mod score;
pub mod signals;

pub use analysis::*;
pub use asset::*;
pub use chart::*;
pub use news::*;
pub use pattern::*;
pub use prediction::*;
pub use score::*;
pub use signals::*;
