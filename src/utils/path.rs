use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// 由前缀和本地文件名组成对象键
///
/// 前缀与文件名直接拼接，不插入分隔符，需要目录层级时前缀应以 `/` 结尾。
///
/// # 参数
///
/// * `prefix` - 对象键前缀
/// * `path` - 本地文件路径，只取最后一段文件名
///
/// # 返回值
///
/// 对象键；路径没有文件名（如 `..` 或 `/`）时返回 `NoFileName`
///
/// # 示例
///
/// ```
/// use tfvars_sync::utils::path::object_key;
///
/// assert_eq!(object_key("tfvars/", "envs/dev.tfvars").unwrap(), "tfvars/dev.tfvars");
/// assert_eq!(object_key("dev-", "dev.tfvars").unwrap(), "dev-dev.tfvars");
/// assert!(object_key("tfvars/", "..").is_err());
/// ```
pub fn object_key(prefix: &str, path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .ok_or_else(|| Error::NoFileName {
            path: path.to_path_buf(),
        })?;

    Ok(format!("{}{}", prefix, file_name))
}

/// 将路径转换为绝对路径，不要求路径存在
///
/// # 返回值
///
/// 绝对路径；路径为空或无法读取当前工作目录时返回 `PathResolution`
pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| Error::PathResolution {
        path: path.to_path_buf(),
        source,
    })
}
