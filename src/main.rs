#[tokio::main]
async fn main() {
    // Failures are already logged by the runtime.
    if attention_checker::run_with_config().await.is_err() {
        std::process::exit(1);
    }
}
