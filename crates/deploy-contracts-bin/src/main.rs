use {clap::Parser, deploy_contracts::arguments::Arguments};

#[tokio::main]
async fn main() {
    let args = Arguments::parse();
    observe::tracing::initialize(&observe::Config::new(&args.log_filter, None));
    observe::panic_hook::install();
    tracing::info!("running deployment with validated arguments:\n{}", args);

    if let Err(err) = deploy_contracts::run(args).await {
        tracing::error!(?err, "deployment failed");
        std::process::exit(1);
    }
}
