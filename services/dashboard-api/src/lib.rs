//! Dashboard API Service Library
//!
//! HTTP surface for the regional NO2 analysis: the pipeline result is
//! turned into a [`view::DashboardView`] and served as JSON.

pub mod app;
pub mod config;
pub mod handlers;
pub mod state;
pub mod view;
