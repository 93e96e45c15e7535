pub mod docs;
pub mod generate;
pub mod rename;
pub mod sync;
pub mod watch;
