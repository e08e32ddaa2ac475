//! End-to-end tests for cellbridge-xlsx.
//!
//! Each test assembles the package it needs from literal XML parts with
//! `zip::ZipWriter`, then reads it through `Document` and `SheetReader`.

mod common;
mod reading;
mod writing;

pub use common::*;
