use std::sync::Arc;

use visitor_counter::{
    app::{AppData, RuntimeData},
    config::Config,
    handler, health,
    store::RedisStore,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    run().await
}

async fn run() {
    let config = Config::from_env();

    health::spawn_healthcheck_listener(config.health_check_port);

    let store = RedisStore::connect(&config.redis_addr, &config.table)
        .await
        .unwrap_or_else(|err| panic!("fail to create redis store: {err:#}"));

    let listen_addr = config.listen_addr.clone();
    let data = prepare_app_data(store, config);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .unwrap_or_else(|err| panic!("fail to bind {listen_addr}: {err}"));
    tracing::info!("visitor counter listening on {listen_addr}");

    axum::serve(listener, handler::router(data))
        .await
        .expect("fail to serve http");
}

fn prepare_app_data(store: RedisStore, config: Config) -> AppData {
    RuntimeData::builder()
        .store(Arc::new(store))
        .config(config)
        .build()
        .into()
}
