//! 命令分发模块
//!
//! 解析位置参数，按环境名选出 tfvars 文件，再交给对象存储或 terraform 执行。
//! 本模块只做路由，不包含业务逻辑。

use crate::config::Settings;
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::s3::ObjectStore;
use crate::terraform::{Provisioner, Terraform};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::debug;

/// 通用用法说明
pub const USAGE: &str = "Usage: tfvars-sync {upload|download|plan|apply} {dev|staging|prod|dr|management} [plan-file (for plan command)]";

/// `--help` 中显示的用法
const SYNOPSIS: &str =
    "tfvars-sync [-v...] {upload|download|plan|apply} {dev|staging|prod|dr|management} [PLAN_FILE]";

/// plan 命令的用法说明
pub const PLAN_USAGE: &str =
    "Usage for plan: tfvars-sync plan {dev|staging|prod|dr|management} {plan-file}";

/// Sync environment tfvars files with S3 and run terraform plan/apply with them.
#[derive(Debug, Parser)]
#[command(name = "tfvars-sync", version, override_usage = SYNOPSIS)]
pub struct Cli {
    /// Operation to run: upload, download, plan or apply
    #[arg(value_name = "OPERATION")]
    pub operation: Option<String>,

    /// Target environment: dev, staging, prod, dr or management
    #[arg(value_name = "ENVIRONMENT")]
    pub environment: Option<String>,

    /// Plan output file (plan only)
    #[arg(value_name = "PLAN_FILE")]
    pub plan_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// 具体操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload,
    Download,
    Plan { plan_file: PathBuf },
    Apply,
}

/// 一次完整的调用：环境加操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub environment: Environment,
    pub command: Command,
}

impl Invocation {
    /// 校验命令行参数。
    ///
    /// 检查顺序：参数个数、环境名、操作名、plan 的输出文件。
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (Some(operation), Some(environment)) = (&cli.operation, &cli.environment) else {
            return Err(Error::Usage(USAGE));
        };

        let environment: Environment = environment.parse()?;

        let command = match operation.as_str() {
            "upload" => Command::Upload,
            "download" => Command::Download,
            "plan" => Command::Plan {
                plan_file: cli.plan_file.clone().ok_or(Error::Usage(PLAN_USAGE))?,
            },
            "apply" => Command::Apply,
            other => return Err(Error::UnknownOperation(other.to_string())),
        };

        Ok(Self {
            environment,
            command,
        })
    }
}

/// 使用配置中的 terraform 可执行文件执行调用。
pub async fn run(invocation: &Invocation, settings: &Settings) -> Result<()> {
    let terraform = Terraform::new(&settings.terraform_bin);
    execute(invocation, settings, &terraform).await
}

/// 执行调用，编排工具由调用方提供。
///
/// 上传和下载时才解析 AWS 凭据，plan/apply 不需要凭据。
pub async fn execute<P>(invocation: &Invocation, settings: &Settings, provisioner: &P) -> Result<()>
where
    P: Provisioner + Sync + ?Sized,
{
    let vars_file = settings.vars_file(invocation.environment)?;
    debug!(environment = %invocation.environment, vars_file = %vars_file.display(), command = ?invocation.command, "dispatching");

    match &invocation.command {
        Command::Upload => {
            println!("Uploading {} to S3...", vars_file.display());
            ObjectStore::connect(settings).await?.upload(vars_file).await?;
        }
        Command::Download => {
            println!("Downloading {} from S3...", vars_file.display());
            ObjectStore::connect(settings).await?.download(vars_file).await?;
        }
        Command::Plan { plan_file } => provisioner.plan(vars_file, plan_file).await?,
        Command::Apply => provisioner.apply(vars_file).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terraform::MockProvisioner;
    use std::collections::HashMap;
    use std::path::Path;

    fn parse(args: &[&str]) -> Result<Invocation> {
        let cli = Cli::try_parse_from(std::iter::once("tfvars-sync").chain(args.iter().copied()))
            .unwrap();
        Invocation::from_cli(&cli)
    }

    fn settings() -> Settings {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DEV_TFVARS", "envs/dev.tfvars"),
            ("STAGING_TFVARS", "envs/staging.tfvars"),
            ("PROD_TFVARS", "envs/prod.tfvars"),
            ("DR_TFVARS", "envs/dr.tfvars"),
            ("MANAGEMENT_TFVARS", "envs/management.tfvars"),
        ]);
        Settings::from_lookup(|key| vars.get(key).map(|value| value.to_string()))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse(&["upload", "dev"]).unwrap(),
            Invocation {
                environment: Environment::Dev,
                command: Command::Upload,
            }
        );
        assert_eq!(
            parse(&["download", "dr"]).unwrap().command,
            Command::Download
        );
        assert_eq!(
            parse(&["apply", "management"]).unwrap(),
            Invocation {
                environment: Environment::Management,
                command: Command::Apply,
            }
        );
        assert_eq!(
            parse(&["plan", "prod", "prod.plan"]).unwrap().command,
            Command::Plan {
                plan_file: PathBuf::from("prod.plan"),
            }
        );
    }

    #[test]
    fn test_missing_arguments_is_usage_error() {
        assert!(matches!(parse(&[]), Err(Error::Usage(USAGE))));
        assert!(matches!(parse(&["upload"]), Err(Error::Usage(USAGE))));
    }

    #[test]
    fn test_plan_without_output_file_is_usage_error() {
        assert!(matches!(parse(&["plan", "dev"]), Err(Error::Usage(PLAN_USAGE))));
    }

    #[test]
    fn test_environment_checked_before_operation() {
        assert!(matches!(
            parse(&["destroy", "qa"]),
            Err(Error::UnknownEnvironment(name)) if name == "qa"
        ));
        assert!(matches!(
            parse(&["destroy", "dev"]),
            Err(Error::UnknownOperation(name)) if name == "destroy"
        ));
    }

    #[test]
    fn test_extra_argument_ignored_outside_plan() {
        assert_eq!(
            parse(&["apply", "staging", "ignored.plan"]).unwrap().command,
            Command::Apply
        );
    }

    #[test]
    fn test_too_many_arguments_rejected_by_parser() {
        let result = Cli::try_parse_from(["tfvars-sync", "plan", "dev", "a.plan", "extra"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_plan_routes_configured_file() {
        for environment in Environment::ALL {
            let expected = format!("envs/{}.tfvars", environment.as_str());

            let mut provisioner = MockProvisioner::new();
            provisioner
                .expect_plan()
                .withf(move |vars_file, plan_file| {
                    vars_file == Path::new(&expected) && plan_file == Path::new("out.plan")
                })
                .times(1)
                .returning(|_, _| Ok(()));

            let invocation = Invocation {
                environment,
                command: Command::Plan {
                    plan_file: PathBuf::from("out.plan"),
                },
            };
            execute(&invocation, &settings(), &provisioner).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_apply_routes_configured_file() {
        let mut provisioner = MockProvisioner::new();
        provisioner
            .expect_apply()
            .withf(|vars_file| vars_file == Path::new("envs/prod.tfvars"))
            .times(1)
            .returning(|_| Ok(()));

        let invocation = Invocation {
            environment: Environment::Prod,
            command: Command::Apply,
        };
        execute(&invocation, &settings(), &provisioner).await.unwrap();
    }

    #[tokio::test]
    async fn test_provisioning_failure_propagates() {
        let mut provisioner = MockProvisioner::new();
        provisioner.expect_apply().times(1).returning(|_| {
            Err(Error::Spawn {
                program: PathBuf::from("terraform"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        });

        let invocation = Invocation {
            environment: Environment::Dev,
            command: Command::Apply,
        };
        let result = execute(&invocation, &settings(), &provisioner).await;
        assert!(matches!(result, Err(Error::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_unset_vars_file_stops_before_provisioning() {
        // 未设置任何期望，调用 provisioner 会导致测试失败
        let provisioner = MockProvisioner::new();
        let settings = Settings::from_lookup(|_| None);

        let invocation = Invocation {
            environment: Environment::Staging,
            command: Command::Apply,
        };
        let result = execute(&invocation, &settings, &provisioner).await;
        assert!(matches!(
            result,
            Err(Error::MissingVarsFile { environment: "staging", .. })
        ));
    }

    #[tokio::test]
    async fn test_upload_without_credentials_fails_before_io() {
        let provisioner = MockProvisioner::new();
        let invocation = Invocation {
            environment: Environment::Dev,
            command: Command::Upload,
        };

        let result = execute(&invocation, &settings(), &provisioner).await;
        assert!(matches!(result, Err(Error::MissingCredentials)));
    }
}
