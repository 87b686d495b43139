#![allow(dead_code)]

pub mod dataset;
pub mod sentimen_env;
