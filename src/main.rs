mod cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine, the variables may already be exported
    dotenvy::dotenv().ok();
    env_logger::init();

    let status = cli::run().await;
    println!("{status}");
    status.exit_code()
}
