//! S3传输模块
//!
//! 单个 tfvars 文件的上传和下载。不重试，传输后不做完整性校验。

use crate::config::{Settings, credentials};
use crate::error::{Error, Result};
use crate::s3::client::build_client;
use crate::utils::path::object_key;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use std::fmt;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// 远程对象引用：存储桶加对象键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    pub bucket: String,
    pub key: String,
}

impl fmt::Display for RemoteObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// 绑定到固定存储桶和键前缀的对象存储
#[derive(Debug, Clone)]
pub struct ObjectStore {
    client: Client,
    bucket: String,
    prefix: String,
}

impl ObjectStore {
    pub fn new(client: Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    /// 根据配置创建对象存储。
    ///
    /// 先解析凭据，再检查存储桶名称，任何一步失败都不会发起网络请求。
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let client_config = credentials::resolve(&settings.auth)?;
        let bucket = settings.bucket()?;

        let client = build_client(
            &client_config,
            settings.endpoint_url.as_deref(),
            settings.force_path_style,
        )
        .await;

        Ok(Self::new(client, bucket, settings.prefix.as_str()))
    }

    /// 本地文件对应的远程对象
    pub fn remote_object(&self, local_path: &Path) -> Result<RemoteObject> {
        Ok(RemoteObject {
            bucket: self.bucket.clone(),
            key: object_key(&self.prefix, local_path)?,
        })
    }

    /// 上传本地文件，对象键为前缀加文件名。
    ///
    /// # 参数
    ///
    /// * `local_path` - 要上传的本地文件
    ///
    /// # 返回值
    ///
    /// 上传成功的远程对象。文件无法打开时返回 `OpenFile`，请求失败时返回 `Upload`。
    pub async fn upload(&self, local_path: &Path) -> Result<RemoteObject> {
        let object = self.remote_object(local_path)?;

        let file = File::open(local_path)
            .await
            .map_err(|source| Error::OpenFile {
                path: local_path.to_path_buf(),
                source,
            })?;
        let body = ByteStream::read_from()
            .file(file)
            .build()
            .await
            .map_err(|e| Error::OpenFile {
                path: local_path.to_path_buf(),
                source: io::Error::other(e),
            })?;

        let content_type = mime_guess::from_path(local_path).first_or_octet_stream();

        info!(%object, content_type = %content_type, "uploading");
        self.client
            .put_object()
            .bucket(&object.bucket)
            .key(&object.key)
            .content_type(content_type.essence_str())
            .body(body)
            .send()
            .await
            .map_err(|e| Error::Upload {
                bucket: object.bucket.clone(),
                key: object.key.clone(),
                detail: DisplayErrorContext(&e).to_string(),
            })?;

        println!(
            "Successfully uploaded {} to {}",
            local_path.display(),
            object.bucket
        );
        Ok(object)
    }

    /// 下载远程对象到本地文件。
    ///
    /// 本地文件先被创建（截断），失败时已写入的部分内容保留在原处。
    ///
    /// # 参数
    ///
    /// * `local_path` - 写入的本地文件，同时决定对象键
    ///
    /// # 返回值
    ///
    /// 写入的字节数。无法创建文件时返回 `CreateFile`，请求或写入失败时返回 `Download`。
    pub async fn download(&self, local_path: &Path) -> Result<u64> {
        let object = self.remote_object(local_path)?;

        let mut file = File::create(local_path)
            .await
            .map_err(|source| Error::CreateFile {
                path: local_path.to_path_buf(),
                source,
            })?;

        info!(%object, "downloading");
        let output = self
            .client
            .get_object()
            .bucket(&object.bucket)
            .key(&object.key)
            .send()
            .await
            .map_err(|e| download_error(&object, DisplayErrorContext(&e)))?;

        let mut body = output.body;
        let mut written: u64 = 0;
        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| download_error(&object, DisplayErrorContext(&e)))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| download_error(&object, e))?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(|e| download_error(&object, e))?;

        println!(
            "Successfully downloaded {} ({} bytes)",
            local_path.display(),
            written
        );
        Ok(written)
    }
}

fn download_error(object: &RemoteObject, detail: impl fmt::Display) -> Error {
    Error::Download {
        bucket: object.bucket.clone(),
        key: object.key.clone(),
        detail: detail.to_string(),
    }
}
