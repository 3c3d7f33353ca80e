//! Core utilities for the DMR CAI decoder
//!
//! This crate provides the bit-level plumbing shared by the CAI stack:
//! - dibit expansion and bitfield loading over bit-per-byte slices
//! - Hamming (7,4,3) and (17,12,3) block codes
//! - CRC-8 for Short LC validation
//! - logging setup and debug utilities

pub mod bits;
pub mod crc8;
pub mod debug;
pub mod hamming;
