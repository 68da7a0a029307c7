//! Server startup utilities.

use timetable_config::ServerConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
  _____ _                _        _     _
 |_   _(_)_ __ ___   ___| |_ __ _| |__ | | ___
   | | | | '_ ` _ \ / _ \ __/ _` | '_ \| |/ _ \
   | | | | | | | | |  __/ || (_| | |_) | |  __/
   |_| |_|_| |_| |_|\___|\__\__,_|_.__/|_|\___|
    "#);
}

/// Prints the addresses the server answers on.
pub fn print_startup_info(server: &ServerConfig) {
    let base = format!("http://{}", server.rest_addr());
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  {}/api", base);
    info!("Health:    {}/health", base);
    info!("API Docs:  {}/swagger-ui", base);
    info!("{}", separator);
}
