//! AWS 凭据解析模块
//!
//! 把环境变量中的认证信息解析为二选一的认证方式：命名 profile 或显式密钥。
//! 解析过程不发起任何网络请求，凭据是否有效要到第一次调用 S3 时才知道。

use crate::error::{Error, Result};
use aws_config::{BehaviorVersion, Region, SdkConfig, retry::RetryConfig};
use aws_sdk_s3::config::Credentials;
use std::fmt;

/// 写入静态凭据时使用的 provider 名称
const STATIC_PROVIDER_NAME: &str = "tfvars-sync-environment";

/// 从环境变量读取的原始认证输入，空字符串视为未设置。
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthInputs {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}

impl fmt::Debug for AuthInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthInputs")
            .field("profile", &self.profile)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "***"))
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// 认证方式
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// 使用共享配置文件中的命名 profile
    Profile(String),
    /// 使用显式的访问密钥
    Static {
        access_key_id: String,
        secret_access_key: String,
        session_token: Option<String>,
    },
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Profile(name) => f.debug_tuple("Profile").field(name).finish(),
            Auth::Static { access_key_id, .. } => f
                .debug_struct("Static")
                .field("access_key_id", access_key_id)
                .finish_non_exhaustive(),
        }
    }
}

/// 已校验的客户端配置：区域加一种认证方式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub region: String,
    pub auth: Auth,
}

/// 解析认证输入。
///
/// 校验顺序：
/// 1. 没有 profile 且缺少访问密钥或秘密密钥时返回 `MissingCredentials`。
/// 2. 没有区域时返回 `MissingRegion`，与认证方式无关。
///
/// profile 存在时优先使用 profile，忽略显式密钥和会话令牌。
pub fn resolve(inputs: &AuthInputs) -> Result<ClientConfig> {
    let has_keys = inputs.access_key_id.is_some() && inputs.secret_access_key.is_some();
    if inputs.profile.is_none() && !has_keys {
        return Err(Error::MissingCredentials);
    }

    let region = inputs.region.clone().ok_or(Error::MissingRegion)?;

    let auth = match (&inputs.profile, &inputs.access_key_id, &inputs.secret_access_key) {
        (Some(profile), _, _) => Auth::Profile(profile.clone()),
        (None, Some(access_key_id), Some(secret_access_key)) => Auth::Static {
            access_key_id: access_key_id.clone(),
            secret_access_key: secret_access_key.clone(),
            session_token: inputs.session_token.clone(),
        },
        _ => return Err(Error::MissingCredentials),
    };

    Ok(ClientConfig { region, auth })
}

impl ClientConfig {
    /// 构建 AWS SDK 配置。
    ///
    /// 重试被关闭，失败直接返回给调用方。`endpoint_url` 用于 S3 兼容服务。
    pub async fn load_sdk_config(&self, endpoint_url: Option<&str>) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .retry_config(RetryConfig::disabled());

        loader = match &self.auth {
            Auth::Profile(name) => loader.profile_name(name),
            Auth::Static {
                access_key_id,
                secret_access_key,
                session_token,
            } => loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                session_token.clone(),
                None,
                STATIC_PROVIDER_NAME,
            )),
        };

        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }

        loader.load().await
    }
}
