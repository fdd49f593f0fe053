#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/comps/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod format;
pub mod table;

pub use export::{DEFAULT_EXPORT_FILE, ExportError, ExportFormat, Exporter};
pub use format::{NOT_AVAILABLE, fmt_mcap, fmt_mult, parse_number};
pub use table::{COLUMNS, ComparisonRow, ComparisonTable, FormattedRow, SortColumn};
