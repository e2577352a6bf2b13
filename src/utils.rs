//! 工具函数模块
//!
//! 路径处理工具：对象键拼接、绝对路径解析。

pub mod path;
