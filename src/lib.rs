pub mod body;
pub mod committer;
pub mod constants;
pub mod driver;
pub mod editor;
pub mod editor_errors;
pub mod host;
mod kepler;
pub mod orbit;
pub mod parameterization;
pub mod params;
pub mod universe;
pub mod vessel;
