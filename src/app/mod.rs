pub mod esim;
pub mod oracle;
pub mod server;
