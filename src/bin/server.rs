use clap::Parser;
use headsup_engine::holdem::server::{Server, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    headsup_engine::init_logging();
    let config = ServerConfig::parse();
    Server::run(config).await
}
