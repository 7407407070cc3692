mod driver;
mod result_row;

pub use driver::DatabaseDriver;
pub use result_row::ResultRow;
