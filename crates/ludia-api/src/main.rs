use ludia_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // .env is optional; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    ludia_api::telemetry::init_telemetry();

    let config = Config::from_env()?;

    let (_state, router) = ludia_api::setup::initialize_app(config.clone()).await?;

    ludia_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
