pub mod delimited;

pub use delimited::{from_reader, read_csv};
