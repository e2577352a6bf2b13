#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// 假的 terraform 可执行文件
///
/// 把收到的参数逐行写入 `args_file`，从标准输入读一行并把结果写入 `stdin_file`；
/// 收到 `plan` 时向 `-out` 指定的文件写入计划内容，然后以 `exit_code` 退出。
pub struct FakeTerraform {
    pub program: PathBuf,
    pub args_file: PathBuf,
    pub stdin_file: PathBuf,
}

impl FakeTerraform {
    pub fn install(dir: &Path, exit_code: i32) -> Self {
        let program = dir.join("fake-terraform");
        let args_file = dir.join("terraform-args.txt");
        let stdin_file = dir.join("terraform-stdin.txt");

        // 测试可能清空 PATH，脚本里只用 shell 内建命令
        let script = format!(
            r#"#!/bin/sh
printf '%s\n' "$@" > '{args}'
if read -r line; then
  printf 'line:%s\n' "$line" > '{stdin}'
else
  printf 'eof\n' > '{stdin}'
fi
if [ "$1" = "plan" ]; then
  printf 'plan for %s\n' "$3" > "$5"
fi
echo "terraform $1 finished"
echo "terraform $1 diagnostics" >&2
exit {exit_code}
"#,
            args = args_file.display(),
            stdin = stdin_file.display(),
        );

        fs::write(&program, script).unwrap();
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();

        Self {
            program,
            args_file,
            stdin_file,
        }
    }

    /// 子进程收到的参数；未被调用时返回 `None`
    pub fn received_args(&self) -> Option<Vec<String>> {
        let content = fs::read_to_string(&self.args_file).ok()?;
        Some(content.lines().map(String::from).collect())
    }

    /// 子进程从标准输入读到的内容：`eof` 或 `line:<内容>`
    pub fn received_stdin(&self) -> Option<String> {
        let content = fs::read_to_string(&self.stdin_file).ok()?;
        Some(content.trim_end().to_string())
    }
}
