#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    marquee::run().await
}
