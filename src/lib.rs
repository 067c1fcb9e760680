pub mod config;
pub mod context;
pub mod feed;
pub mod model;
pub mod persistence;
pub mod presence;
pub mod runtime;
pub mod seed;
pub mod state;
pub mod validation;
