//! Checklist use-case services.
//!
//! # Responsibility
//! - Orchestrate item mutations, persistence writes and image bookkeeping.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod checklist_service;
pub mod image_request;
pub mod score_draft;
