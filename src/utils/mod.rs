pub mod cast_hash;

pub use cast_hash::extract_cast_hash;
