pub mod column;
pub mod error;
pub mod parser;
pub mod row;
pub mod table;
pub use column::{Column, TimeValue};
pub use error::DataError;
pub use row::{build_dataset, DataRow, DataRowBuilder, Value};
pub use table::{Dataset, DatasetBuilder};
