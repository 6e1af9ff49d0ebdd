pub mod api;
pub mod clock;
pub mod companion;
pub mod config;
pub mod content;
pub mod journal;
pub mod mood;
pub mod stats;
pub mod storage;
pub mod store;
pub mod theme;
pub mod timer;
pub mod todo;
pub mod utils;
