pub mod neynar;

pub use neynar::*;
