pub mod detectors;
pub mod formcheck_env;
pub mod media;
