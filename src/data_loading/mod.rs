pub mod csv_table_loader;
pub mod raw_table;

pub use csv_table_loader::CsvTableLoader;
pub use raw_table::RawTable;
