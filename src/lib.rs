#![allow(clippy::implicit_hasher)]

pub mod components;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod map;
pub mod models;
pub mod services;
pub mod settings;
pub mod store;

pub use components::app::App;
pub use error::{MapError, Result, StoreError};
