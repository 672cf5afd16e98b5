mod apply;
mod build;
mod init;
mod inspect;
mod new;

pub use apply::handle_apply_command;
pub use build::handle_build_command;
pub use init::handle_init_command;
pub use inspect::handle_inspect_command;
pub use new::handle_new_command;
