//! memtrack - periodic host memory tracker.
//!
//! Samples total/used/available memory once per second and either redraws
//! the console with a short history table or appends each sample to a log
//! file, while a listener thread watches the console for exit/menu commands.

pub mod collector;
pub mod model;
pub mod provider;
pub mod session;
