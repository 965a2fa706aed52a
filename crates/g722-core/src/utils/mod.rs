//! Utility functions shared by the codec implementations

pub mod validation;
