use eyre::Report;

#[tokio::main]
async fn main() -> Result<(), Report> {
    unimart::run().await
}
