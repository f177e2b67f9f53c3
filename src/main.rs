#[tokio::main]
async fn main() {
    workouts::start_server().await;
}
