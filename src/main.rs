use clap::Parser;
use std::process::ExitCode;
use tfvars_sync::dispatch::{self, Cli, Invocation};
use tfvars_sync::{Error, Settings, logging};
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 加载工作目录下的 .env 文件，不覆盖已设置的变量
    dotenvy::from_path(".env").ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version 走这里但不算失败
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(cli.verbose);

    let settings = Settings::from_env();
    debug!(?settings, "loaded settings");

    match run(&cli, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ (Error::Usage(_) | Error::UnknownEnvironment(_) | Error::UnknownOperation(_))) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Operation failed: {:#}", anyhow::Error::from(err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, settings: &Settings) -> tfvars_sync::Result<()> {
    let invocation = Invocation::from_cli(cli)?;
    dispatch::run(&invocation, settings).await
}
