pub mod environment;
pub mod explicit_file;
pub mod global_file;
pub mod workspace_file;
