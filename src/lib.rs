//! tfvars 同步工具库
//!
//! 这是一个面向运维人员和 CI 的命令行工具，主要功能包括：
//! - 按部署环境把 tfvars 文件上传到 S3 或从 S3 下载
//! - 使用对应环境的 tfvars 文件运行 `terraform plan` / `terraform apply`
//!
//! 所有配置在启动时从环境变量读取一次，以 [`Settings`] 显式传递。

pub mod config;
pub mod dispatch;
pub mod environment;
pub mod error;
pub mod logging;
pub mod s3;
pub mod terraform;
pub mod utils;

pub use config::Settings;
pub use environment::Environment;
pub use error::{Error, Result};
