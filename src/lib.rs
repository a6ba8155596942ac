//! Resume Tailor - AI-orchestrated resume tailoring
//!
//! Keeps a library of experience bullets per candidate and, for each job
//! application, analyzes the job description, selects and rewrites the most
//! relevant bullets, writes a summary and scores the result.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
