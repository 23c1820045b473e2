pub mod checkpoint;

pub use checkpoint::{count_output_records, inspect, BatchState};
