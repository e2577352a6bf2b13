//! S3模块
//!
//! 该模块负责与 S3 存储桶的交互：根据解析好的凭据构建客户端，
//! 上传和下载单个 tfvars 对象。

pub mod client;
pub mod transfer;

pub use client::build_client;
pub use transfer::{ObjectStore, RemoteObject};
