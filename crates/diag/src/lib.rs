pub mod report;
mod snippet;

pub use report::{Level, RenderError, Report};
