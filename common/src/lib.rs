//! Shelter Intake Common Library
//!
//! 保護動物入所データのデータモデルとルールベース分類器。
//! I/O・ログを持たない純粋な関数のみを置く。

pub mod types;
pub mod table;
pub mod error;
pub mod dates;
pub mod text;
pub mod address;
pub mod color;
pub mod location;
pub mod status;

pub use types::{ColumnKind, Value};
pub use table::{Column, Table};
pub use error::{Error, Result};
pub use dates::{parse_date, Season, TimeComponents, DEFAULT_DATE_FORMAT};
pub use text::{extract_breed, extract_weight};
pub use address::{categorize_region, decompose_address, AdministrativeRegion};
pub use color::{classify_color, ColorClassification};
pub use location::{classify_location, LocationClassification};
pub use status::{animal_status, animal_type, neuter_label, normalize_process_state, process_category, sex_label};
