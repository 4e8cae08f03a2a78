//! Backend core for a Japanese lyrics study app: lyrics cleanup, a cached
//! word translator, AI evaluation of learner translations and the learner's
//! saved records, driven over a line-delimited JSON protocol.

pub mod config;
pub mod error;
pub mod model;
pub mod protocol;
pub mod services;
