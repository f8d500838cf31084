mod ethereum;
mod global;
mod rpc;
mod shell;
mod wallet;

pub use ethereum::*;
pub use global::*;
pub use rpc::*;
pub use shell::*;
pub use wallet::*;
