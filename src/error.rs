//! 错误类型模块
//!
//! 所有组件共用同一个错误枚举，错误一律向上传递到 `main`，不做重试或局部恢复。

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// 本 crate 的统一 `Result` 别名
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("AWS_PROFILE environment variable or AWS access key and secret key are not set")]
    MissingCredentials,

    #[error("AWS_REGION environment variable is not set")]
    MissingRegion,

    #[error("S3_BUCKET environment variable is not set")]
    MissingBucket,

    /// 所选环境对应的 tfvars 路径变量未设置或为空
    #[error("no tfvars file configured for {environment} (set {variable})")]
    MissingVarsFile {
        environment: &'static str,
        variable: &'static str,
    },

    #[error("failed to open file {path:?}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot derive an object name from {path:?}")]
    NoFileName { path: PathBuf },

    #[error("failed to upload file to s3://{bucket}/{key}: {detail}")]
    Upload {
        bucket: String,
        key: String,
        detail: String,
    },

    #[error("failed to create file {path:?}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to download file from s3://{bucket}/{key}: {detail}")]
    Download {
        bucket: String,
        key: String,
        detail: String,
    },

    #[error("failed to get absolute path of {path:?}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to run {program:?}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 子进程以非零状态退出，诊断信息已直接输出到终端
    #[error("terraform {subcommand} failed: {status}")]
    ProvisioningFailed {
        subcommand: &'static str,
        status: ExitStatus,
    },

    /// 参数数量不足，消息即为用法说明
    #[error("{0}")]
    Usage(&'static str),

    #[error("Invalid environment specified: {0}")]
    UnknownEnvironment(String),

    #[error("Unknown command {0}")]
    UnknownOperation(String),
}
