// Entrypoint for the CLI application.
// Keeps `main` small: set up logging, read the configuration and hand
// over to the menu loop.

use movie_catalog::{logging, Config};

fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let config = Config::from_env();
    log::debug!("starting with catalog {}", config.catalog_path.display());

    movie_catalog::run(&config)
}
