pub mod formatter;

pub use formatter::{
    format_assessment_table, format_discount, format_json, format_metrics, format_rri,
    format_tsv, should_use_colors,
};
