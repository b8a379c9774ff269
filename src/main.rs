use underfs::prelude::*;
use underfs::version::full_version;

#[tokio::main]
async fn main() -> UnderFsResult<()> {
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, Layer};

    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::DEBUG.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
    tracing::debug!("running underfs {}", full_version());

    // Picks up UNDERFS_FILE_CREATION_UMASK and friends from the environment
    let config = Configuration::from_env();

    let create_options = CreateOptions::from_configuration(&config)?;
    let mkdirs_options = MkdirsOptions::from_configuration(&config)?;

    tracing::info!("file creation options: {create_options}");

    let mut store = MemoryUnderStore::new();
    store.mkdirs("/demo/artifacts", &mkdirs_options).await?;
    store
        .create("/demo/artifacts/hello.txt", &create_options, b"hello world")
        .await?;

    let listing = store
        .list("/demo", &ListOptions::default().with_recursive(true))
        .await?;

    for status in listing {
        tracing::info!(
            path = status.path(),
            size = status.size(),
            "{}",
            status.permission_status()
        );
    }

    Ok(())
}
