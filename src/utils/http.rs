use reqwest::{
    cookie::Jar,
    header::{self, HeaderMap, HeaderValue},
    Client,
};
use std::{sync::Arc, time::Duration};

pub fn create_telegram_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(300))
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Duration::from_secs(60))
        .tcp_keepalive(Duration::from_secs(30))
        .user_agent("TelegramBot/1.0")
        .build()
        .expect("Failed to build Telegram client")
}

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub fn create_instagram_client(cookie_store: Arc<Jar>) -> Client {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert("X-IG-App-ID", HeaderValue::from_static("936619743392459"));
    headers.insert(header::ORIGIN, HeaderValue::from_static("https://www.instagram.com"));
    headers.insert(header::REFERER, HeaderValue::from_static("https://www.instagram.com/"));

    Client::builder()
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(30))
        .cookie_provider(Arc::clone(&cookie_store))
        .default_headers(headers)
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .expect("Failed to build Instagram client")
}
