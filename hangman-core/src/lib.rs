pub mod board;
pub mod round;
pub mod scoring;
pub mod session;
pub mod word_catalog;

// Re-export main components
pub use board::*;
pub use round::*;
pub use scoring::*;
pub use session::*;
pub use word_catalog::*;
