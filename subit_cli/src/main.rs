use clap::Parser;
use subit_cli::app::{self, Cli};
use subit_cli::error::ExitCode;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are printed to stdout and are not failures
            let code = if e.use_stderr() {
                ExitCode::Usage
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            return code.into();
        }
    };

    app::init_logging(cli.debug, cli.verbose);

    match app::run(&cli).await {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::Success.into()
        }
        Err(e) => {
            eprint!("{}", e.format_for_user(cli.debug));
            e.exit_code().into()
        }
    }
}
