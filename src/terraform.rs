//! Terraform 执行模块
//!
//! 以子进程方式运行 `terraform plan` / `terraform apply`。子进程继承标准输出和标准错误，
//! 输出实时转发到终端，不做捕获；标准输入接到空设备，子进程不会等待交互输入。

use crate::error::{Error, Result};
use crate::utils::path::absolute;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

/// 基础设施编排工具的调用接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Provisioner {
    /// 生成执行计划，写入 `plan_file`。
    async fn plan(&self, vars_file: &Path, plan_file: &Path) -> Result<()>;

    /// 应用变更，自动确认。
    async fn apply(&self, vars_file: &Path) -> Result<()>;
}

/// 调用外部 terraform 可执行文件
#[derive(Debug, Clone)]
pub struct Terraform {
    program: PathBuf,
}

impl Terraform {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 运行子命令并等待退出，非零退出码映射为 `ProvisioningFailed`。
    async fn run(&self, subcommand: &'static str, args: Vec<OsString>) -> Result<()> {
        info!(program = %self.program.display(), ?args, "running terraform");

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::ProvisioningFailed { subcommand, status });
        }

        Ok(())
    }
}

#[async_trait]
impl Provisioner for Terraform {
    async fn plan(&self, vars_file: &Path, plan_file: &Path) -> Result<()> {
        let vars_file = absolute(vars_file)?;
        let plan_file = absolute(plan_file)?;
        self.run("plan", plan_args(&vars_file, &plan_file)).await
    }

    async fn apply(&self, vars_file: &Path) -> Result<()> {
        let vars_file = absolute(vars_file)?;
        self.run("apply", apply_args(&vars_file)).await
    }
}

/// `plan -var-file <vars> -out <plan>`
pub fn plan_args(vars_file: &Path, plan_file: &Path) -> Vec<OsString> {
    vec![
        "plan".into(),
        "-var-file".into(),
        vars_file.into(),
        "-out".into(),
        plan_file.into(),
    ]
}

/// `apply -var-file <vars> -auto-approve`
pub fn apply_args(vars_file: &Path) -> Vec<OsString> {
    vec![
        "apply".into(),
        "-var-file".into(),
        vars_file.into(),
        "-auto-approve".into(),
    ]
}
