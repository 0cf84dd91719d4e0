#![allow(dead_code)]

pub mod producers;
