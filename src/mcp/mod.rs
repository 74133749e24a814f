pub mod server;

pub use server::{CentroGuiaMcpServer, run_server};
