//! S3客户端模块
//!
//! 该模块负责根据已解析的客户端配置创建 S3 客户端。

use crate::config::ClientConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{RequestChecksumCalculation, ResponseChecksumValidation};
use tracing::debug;

/// 创建 S3 客户端。
///
/// # 参数
///
/// * `config` - 已解析的区域和认证方式
/// * `endpoint_url` - S3 兼容服务的端点 URL，`None` 时使用 AWS 默认端点
/// * `force_path_style` - 是否使用路径风格寻址（`endpoint/bucket/key`）
///
/// # 返回值
///
/// 配置好的 `aws_sdk_s3::Client`。此处不发起网络请求。
pub async fn build_client(
    config: &ClientConfig,
    endpoint_url: Option<&str>,
    force_path_style: bool,
) -> Client {
    debug!(region = %config.region, auth = ?config.auth, ?endpoint_url, "building s3 client");

    let sdk_config = config.load_sdk_config(endpoint_url).await;
    let mut builder =
        aws_sdk_s3::config::Builder::from(&sdk_config).force_path_style(force_path_style);

    // S3 兼容服务未必支持 SDK 默认附加的 CRC 校验和
    if endpoint_url.is_some() {
        builder = builder
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .response_checksum_validation(ResponseChecksumValidation::WhenRequired);
    }

    Client::from_conf(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Auth;
    use aws_config::Region;

    #[tokio::test]
    async fn test_build_client_uses_resolved_region() {
        let config = ClientConfig {
            region: "ap-southeast-2".to_string(),
            auth: Auth::Static {
                access_key_id: "AKIA".to_string(),
                secret_access_key: "secret".to_string(),
                session_token: None,
            },
        };

        let client = build_client(&config, Some("http://127.0.0.1:9000"), true).await;
        let conf = client.config();

        assert_eq!(conf.region(), Some(&Region::new("ap-southeast-2")));
    }
}
