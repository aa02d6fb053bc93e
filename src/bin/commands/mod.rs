pub mod build_cmd;
pub mod inspect_cmd;
pub mod validate_cmd;

pub use build_cmd::cmd_build;
pub use inspect_cmd::cmd_inspect;
pub use validate_cmd::cmd_validate;
