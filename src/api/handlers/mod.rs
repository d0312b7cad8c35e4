//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod auth;
pub mod dashboard;
pub mod groups;
pub mod health;
pub mod me;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod ratings;
pub mod users;
pub mod work_posts;
