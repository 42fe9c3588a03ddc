#[cfg(feature = "lambda")]
use lab_mix::config::lambda::{handle_request, LambdaConfig, Request, Response};
#[cfg(feature = "lambda")]
use lab_mix::utils::logger;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時載入一次預設值
    let engine = Arc::new(
        LambdaConfig::from_env()
            .build_engine()
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?,
    );
    tracing::info!("lab-mix Lambda ready");

    run(service_fn(move |event: LambdaEvent<Request>| {
        let engine = Arc::clone(&engine);
        async move { Ok::<Response, Error>(handle_request(&engine, event.payload).await) }
    }))
    .await
}
