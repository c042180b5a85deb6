use axum::Router;
use dramakita::{ApiClient, ProviderId, ProviderRegistry};

/// 在随机端口启动一个本地上游服务，返回其基础地址
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Melolo 与 Netshort 都指向同一个本地服务
pub fn client(base: &str) -> ApiClient {
    ApiClient::with_client(
        reqwest::Client::new(),
        ProviderRegistry::empty()
            .with(ProviderId::Melolo, base)
            .with(ProviderId::Netshort, base),
    )
}
