//! MTProxy Admin Bot Library
//!
//! Startup configuration for a Telegram bot that administers an
//! MTProxy service.
//!
//! This crate provides:
//! - Loading the bot configuration from environment variables
//! - Validation and defaulting of the configured values
//! - Owner and admin authorization helpers for downstream handlers

pub mod config;
