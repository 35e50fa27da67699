use actix_files::{Files, NamedFile};
use actix_web::{web, App, HttpServer, middleware::Logger};
use anyhow::Context;

mod config;

use config::SiteConfig;

async fn spa(index: web::Data<std::path::PathBuf>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open(index.get_ref())?)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = SiteConfig::from_env()?;
    log::info!("serving {} and {} on http://{}:{}", cfg.dist.display(), cfg.assets.display(), cfg.addr, cfg.port);

    let index = web::Data::new(cfg.dist.join("index.html"));
    let (dist, assets) = (cfg.dist.clone(), cfg.assets.clone());

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(index.clone())
            // model, panorama and viewer.json
            .service(Files::new("/assets", assets.clone()))
            // the SPA bundle built by Trunk
            .service(Files::new("/", dist.clone()).index_file("index.html"))
            // fallback -> SPA for any other path
            .default_service(web::get().to(spa))
    })
    .bind((cfg.addr, cfg.port))
    .with_context(|| format!("binding {}:{}", cfg.addr, cfg.port))?
    .run()
    .await
    .context("server stopped")
}
