pub mod file;
pub mod remote;

pub use file::FileSource;
pub use remote::RemoteSource;
