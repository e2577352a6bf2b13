//! 部署环境模块
//!
//! 固定的五个部署环境，每个环境对应一个 tfvars 文件路径变量。

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
    Dr,
    Management,
}

impl Environment {
    /// 所有可接受的环境，顺序与命令行用法说明一致
    pub const ALL: [Environment; 5] = [
        Environment::Dev,
        Environment::Staging,
        Environment::Prod,
        Environment::Dr,
        Environment::Management,
    ];

    /// 命令行中使用的环境名称
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
            Environment::Dr => "dr",
            Environment::Management => "management",
        }
    }

    /// 保存该环境 tfvars 文件路径的环境变量名
    pub fn vars_file_variable(self) -> &'static str {
        match self {
            Environment::Dev => "DEV_TFVARS",
            Environment::Staging => "STAGING_TFVARS",
            Environment::Prod => "PROD_TFVARS",
            Environment::Dr => "DR_TFVARS",
            Environment::Management => "MANAGEMENT_TFVARS",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| Error::UnknownEnvironment(s.to_string()))
    }
}
