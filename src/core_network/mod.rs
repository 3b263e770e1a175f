pub mod data_conn;
pub mod error;
pub mod network;
pub mod pasv;
pub mod port;

pub use data_conn::acquire_data_connection;

#[cfg(test)]
mod test_network;
