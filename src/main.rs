#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rocket = snake_leaderboard::server::rocket().await?;
    let _rocket = rocket.launch().await?;
    Ok(())
}
