mod error;
pub use error::ExecError;

mod output;
pub use output::ExecOutput;

mod ssh;
pub use ssh::{OpenSsh, RemoteExec, SshConfig};
