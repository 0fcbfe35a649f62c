use tokio::net::TcpListener;

/// Run the fixture standalone, for poking at the routes by hand.
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3100".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("mock server listening on {addr}");
    mock_server::run(listener).await
}
