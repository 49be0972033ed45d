pub mod common;
pub mod widget;

pub use widget::{ReviewForm, SubmitOutcome, Widget};
