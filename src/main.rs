mod allocator;

use std::process::ExitCode;

use vericode::app::App;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    App::init()?.execute().await
}
