//! Filesystem and environment helpers.

pub mod paths;

pub use paths::{default_session_file, expand_tilde, get_data_dir, DATA_DIR_ENV};
