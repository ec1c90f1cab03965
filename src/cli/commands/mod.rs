mod command_result;
pub mod extract;
pub mod find;
pub mod helper;
pub mod imports;
pub mod init;
pub mod locate;
pub mod scan;

pub use command_result::*;
