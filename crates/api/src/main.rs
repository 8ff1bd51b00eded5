use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    roofline_observability::init();

    let cfg = roofline_infra::load_config()?;
    if cfg.auth.uses_dev_secret() {
        tracing::warn!("auth.jwt_secret not set; using insecure dev default");
    }
    let addr = cfg.server.bind_address();

    let app = roofline_api::app::build_app(cfg).await?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
