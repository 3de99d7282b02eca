mod cli;
mod infra;
mod routes;
mod score;
mod server;

use crs_portal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
