//! AgrowMart - account and session client
//!
//! Signup, login with persistent sessions, profile management and password
//! recovery against the AgrowMart Naturals account API.

pub mod api;
pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod profile;
pub mod routes;
pub mod session;
pub mod ui;
pub mod validate;

pub use error::{AgrowError, AgrowResult};
