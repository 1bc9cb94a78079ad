//! # syl-core
//!
//! Core types shared by every Syllabus crate.
//!
//! - In-memory course model built by the content loader and consumed by the
//!   synchronizer (course → chapters → subchapters, questions → options/slots)
//! - Natural-key naming helpers (stable uids and fallback display names)
//! - Plan and report types printed by the `syl` binary

pub mod entities;
pub mod ids;
pub mod responses;
