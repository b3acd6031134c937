//! 文件服务模块
//!
//! 提供文件系统抽象；目前只有本地后端

pub mod local;
pub mod service;

pub use local::LocalFileProvider;
pub use service::FileService;
