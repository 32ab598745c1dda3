use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use lambda_http::{run, service_fn, Error, Request};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

use upload::{handler::UploadHandler, presign::S3Presigner, types::Environment};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let environment = Environment::from_env()?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();

    // CloudWatch stamps every line, so the timestamp is left out
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .init();
    }

    let bucket = environment.upload_bucket()?;
    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let presigner = Arc::new(S3Presigner::new(
        s3_client,
        environment.presigned_url_expiry_secs(),
    ));
    let handler = UploadHandler::new(bucket, presigner);

    tracing::info!(
        "Upload handler ready for bucket {} ({:?}, endpoint: {:?})",
        handler.bucket(),
        environment,
        environment.endpoint_url()
    );

    let handler = &handler;
    run(service_fn(move |request: Request| async move {
        handler.handle(request).await.map_err(Error::from)
    }))
    .await
}
