use pizza_restaurant_service::{establish_pool, run_migrations, seed};

pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let pool = establish_pool()?;

    tokio::task::spawn_blocking(move || {
        run_migrations(&pool)?;
        let mut conn = pool.get()?;
        seed::seed(&mut conn)?;
        Ok::<_, Box<dyn std::error::Error + Send + Sync>>(())
    })
    .await??;

    Ok(())
}
