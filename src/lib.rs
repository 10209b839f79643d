pub mod cli;
pub mod error;
pub mod git;
pub mod gitlab;
pub mod logging;
pub mod model;
pub mod plot;
pub mod report;
pub mod source;
pub mod usermap;
pub mod util;
