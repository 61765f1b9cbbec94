/*
Shared algorithms, data structures and utilities for the WhiteboxTools workspace.
*/

pub mod algorithms;
pub mod configs;
pub mod errors;
pub mod structures;
pub mod utils;
