//! Darkroom App: session state and the UI message layer.
//!
//! A [`Session`] holds the current and processed images for one user. The
//! UI talks to it through the [`ipc`] message enums; [`ipc::dispatch`]
//! turns each request into the replies to send back.

pub mod chart;
pub mod config;
mod error;
pub mod ipc;
pub mod session;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use ipc::{CoreToUi, UiToCore, dispatch, dispatch_json};
pub use session::Session;
