pub mod apply;
pub mod config;
pub mod destroy;
pub mod import;
pub mod lookup;
pub mod refresh;
pub mod state;
