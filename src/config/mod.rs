//! 配置模块
//!
//! 进程启动时从环境变量一次性读取全部配置，之后以不可变的 [`Settings`]
//! 显式传递给各个组件，不使用全局状态。
//!
//! # 环境变量
//!
//! * `S3_BUCKET` - 存储桶名称（上传/下载时必须设置）
//! * `S3_PATH` - 对象键前缀，直接与文件名拼接
//! * `DEV_TFVARS` / `STAGING_TFVARS` / `PROD_TFVARS` / `DR_TFVARS` / `MANAGEMENT_TFVARS` - 各环境的 tfvars 文件路径
//! * `AWS_PROFILE` / `AWS_REGION` / `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` / `AWS_SESSION_TOKEN` - 认证信息
//! * `S3_ENDPOINT` - S3 兼容服务的端点 URL（可选）
//! * `S3_FORCE_PATH_STYLE` - 设为 `true` 或 `1` 时使用路径风格寻址
//! * `TERRAFORM_BIN` - terraform 可执行文件，默认为 `terraform`

pub mod credentials;

pub use credentials::{Auth, AuthInputs, ClientConfig};

use crate::environment::Environment;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

/// 默认的 terraform 可执行文件
pub const DEFAULT_TERRAFORM_BIN: &str = "terraform";

/// 进程级配置，启动时构建一次。
#[derive(Debug, Clone)]
pub struct Settings {
    pub bucket: Option<String>,
    pub prefix: String,
    pub auth: AuthInputs,
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
    pub terraform_bin: PathBuf,
    vars_files: BTreeMap<Environment, PathBuf>,
}

impl Settings {
    /// 从进程环境变量读取配置。
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 使用给定的查找函数读取配置，空字符串视为未设置。
    ///
    /// # 参数
    ///
    /// * `lookup` - 按变量名返回变量值的函数
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let vars_files = Environment::ALL
            .into_iter()
            .filter_map(|env| var(env.vars_file_variable()).map(|path| (env, PathBuf::from(path))))
            .collect();

        Settings {
            bucket: var("S3_BUCKET"),
            prefix: var("S3_PATH").unwrap_or_default(),
            auth: AuthInputs {
                profile: var("AWS_PROFILE"),
                region: var("AWS_REGION"),
                access_key_id: var("AWS_ACCESS_KEY_ID"),
                secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
                session_token: var("AWS_SESSION_TOKEN"),
            },
            endpoint_url: var("S3_ENDPOINT"),
            force_path_style: var("S3_FORCE_PATH_STYLE").is_some_and(|value| parse_flag(&value)),
            terraform_bin: var("TERRAFORM_BIN")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TERRAFORM_BIN)),
            vars_files,
        }
    }

    /// 获取环境对应的 tfvars 文件路径。
    ///
    /// # 返回值
    ///
    /// 路径未配置时返回 `MissingVarsFile`，此时不会进行任何 I/O。
    pub fn vars_file(&self, environment: Environment) -> Result<&Path> {
        self.vars_files
            .get(&environment)
            .map(PathBuf::as_path)
            .ok_or(Error::MissingVarsFile {
                environment: environment.as_str(),
                variable: environment.vars_file_variable(),
            })
    }

    /// 获取存储桶名称。
    pub fn bucket(&self) -> Result<&str> {
        self.bucket.as_deref().ok_or(Error::MissingBucket)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true")
}
