//! Field-level normalizers shared by the cleaning pipeline.
pub mod date;
pub mod rating;
pub mod text;

pub use date::{format_release_date, parse_release_date, RELEASE_DATE_FORMAT};
pub use rating::{parse_rating, parse_review_count};
pub use text::normalize_label;
