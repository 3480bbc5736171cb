pub mod content;
pub mod export;
pub mod filter;
pub mod private;
pub mod summary;
pub mod user;
