//! PLU Barcode Common Library
//!
//! CLIとテストで共有される型と、IOを伴わないユーティリティ

pub mod types;
pub mod layout;
pub mod ledger;
pub mod error;
pub mod parser;

pub use types::{CatalogEntry, OutputFormat};
pub use layout::CanvasLayout;
pub use ledger::NotFoundLedger;
pub use error::{Error, Result};
pub use parser::{parse_code_list, parse_menu_choice, parse_selection, MenuChoice};
