#![no_std]

extern crate embedded_hal;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod demo;
pub mod error;
pub mod graph;
pub mod layout;
pub mod sprite;
pub mod terminal;

pub use demo::ScrollDemo;
pub use error::Error;
pub use layout::Layout;
pub use sprite::{Color, ScrollRegion, Sprite};
