//! One module per CLI subcommand, each implemented as a `cmd_*` method on [`crate::App`].

pub mod check;
pub mod commit;
pub mod create_branch;
pub mod create_mr;
pub mod init;
