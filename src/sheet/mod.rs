mod parse;
mod rows;
mod source;

pub use rows::{
    CountryColumns, CountryRow, IndustryColumns, IndustryRow, Normalized, normalize_rows,
};
pub use source::{FetchError, FileSource, RowSource, SheetsSource};
