use tracing::Level;

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_ansi(false)
        // stdout is reserved for command output
        .with_writer(std::io::stderr)
        .json()
        .init();
}
