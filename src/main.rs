use anyhow::Context;
use cozputer::{Runtime, VERSION};
use cozputer::runtime::RuntimeConfig;
use cozputer::sink::ConsoleSink;
use cozputer::utils::{generate_demo_program, write_program};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Cozputer v{}", VERSION);

    // Create demo program file
    let demo_path = "demo.coz";
    let demo = generate_demo_program();
    write_program(&demo, demo_path).context("Failed to create demo program file")?;
    tracing::info!("Created demo program file: {}", demo_path);

    let runtime = Runtime::with_config(
        RuntimeConfig::default()
            .with_debug_mode(true)
            .with_trace_execution(true),
    );

    let mut cpu = runtime.interpreter(ConsoleSink::new());
    let executed = runtime
        .execute_file(demo_path, &mut cpu)
        .context("Demo program failed")?;

    tracing::info!(executed, memory = ?cpu.memory(), "execution completed");
    Ok(())
}
