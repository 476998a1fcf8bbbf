pub mod advisor;
pub mod analysis;
pub mod color;
pub mod matcher;
pub mod wardrobe;

pub use advisor::*;
pub use analysis::*;
pub use color::*;
pub use matcher::*;
pub use wardrobe::*;
