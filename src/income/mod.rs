pub mod chart;
pub mod export;
pub mod household;
pub mod normalize;
pub mod raw;
pub mod table;

pub use chart::{ChartData, ChartKind};
pub use household::HouseholdTypeMap;
pub use normalize::{load_income_file, load_income_files, normalize_lines, parse, NormalizedRow};
pub use raw::RawRecord;
pub use table::{IncomeTable, KeyMetrics, Overview, Selection, View};
