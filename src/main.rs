use std::process::ExitCode;

use userauth::run;

fn main() -> anyhow::Result<ExitCode> {
    // Each command is a single store call; one thread is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run())
}
