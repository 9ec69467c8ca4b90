pub mod batch;
pub mod benchmark;
pub mod filter;
pub mod kernel;
pub mod params;
pub mod performance;
pub mod pixel_buffer;
pub mod processor;
pub mod reference;
pub mod result_set;
