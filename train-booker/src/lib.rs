//! Train search and booking server.
//!
//! A web application that answers: "which trains run between these two
//! stations on this date, and what does my class cost?" Offers come from a
//! synthetic generator or a transit routing API, normalized into one shape.

pub mod cache;
pub mod domain;
pub mod search;
pub mod source;
pub mod web;
