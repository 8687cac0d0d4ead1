#![no_std]
extern crate alloc;

pub mod corruptor;
pub mod dma;
pub mod vdp_bus;

pub use dma::{DmaSource, PendingFill};
pub use vdp_bus::Vdp;
