//! SubIt command line interface
//!
//! The binary is a thin layer over `subit_client_core`: argument parsing,
//! layered configuration, logging setup and exit-code mapping.

pub mod app;
pub mod config;
pub mod error;
