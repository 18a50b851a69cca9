//! Attune - Attachment-Aware Conversational Wellbeing Backend
//!
//! This crate maintains a per-user model of psychological attachments
//! (values and goals) and streaming perceptions derived from conversation,
//! and decides in real time when to surface somatic body-awareness prompts
//! and distress check-ins, gated by explicit per-user consent.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
