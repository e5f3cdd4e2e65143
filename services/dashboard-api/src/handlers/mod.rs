//! HTTP request handlers for the dashboard API.

pub mod california;
pub mod health;
pub mod landing;
