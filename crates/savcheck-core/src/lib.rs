//! Survey duplicate-ID pipeline.
//!
//! Stages run strictly in order: load a .sav file into a DataFrame plus
//! dictionary metadata, normalize column names and values, resolve coded
//! values to labels, then detect duplicate identifiers among non-cancelled
//! records. The only suspension point is the missing-column resolution,
//! which blocks on a [`ColumnResolver`] decision.

pub mod data_utils;
pub mod dedupe;
pub mod labels;
pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod resolver;

pub use data_utils::{any_to_f64, any_to_i64, any_to_string, display_value};
pub use dedupe::find_duplicate_ids;
pub use labels::apply_value_labels;
pub use loader::load_survey;
pub use normalize::normalize_frame;
pub use pipeline::{CheckOutcome, run_check};
pub use resolver::{
    ColumnResolver, MissingColumnChoice, ScriptedResolver, parse_column_list, resolve_subset,
};
